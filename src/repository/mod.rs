//! Data access for items.
//!
//! [`ItemQuerier`](item_repository::ItemQuerier) is implemented once against
//! PostgreSQL and once in memory.

pub mod item_repository;
pub mod memory_item_repository;

#[cfg(test)]
mod conformance;

pub use item_repository::{
    CreateItemParams, GetAllItemsParams, Item, ItemQuerier, PgItemRepository, UpdateItemParams,
};
pub use memory_item_repository::{MemoryDb, MemoryItemRepository};
