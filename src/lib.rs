//! Typed storage for items in PostgreSQL.
//!
//! Every operation takes the connection or transaction to run against,
//! so transaction boundaries stay with the caller.

pub mod infra;
pub mod repository;
