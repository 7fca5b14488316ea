//! For interacting with the database.

use super::config::DatabaseConfig;
use sqlx::{
    pool::PoolOptions,
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions, PgConnection, PgPool, Postgres, Transaction,
};
use tracing::log::LevelFilter;

/// A common transaction type.
pub type Tx = Transaction<'static, Postgres>;

/// A common database connection type.
/// Both pooled connections and [`Tx`] dereference to it.
pub type DbConnection = PgConnection;

/// A common database pool type.
pub type DbPool = PgPool;

/// Connects to the database based on some configuration.
pub fn init_db(config: &DatabaseConfig) -> DbPool {
    let db_options = PgConnectOptions::default()
        .username(&config.username)
        .password(&config.password)
        .host(&config.host)
        .port(config.port)
        .database(&config.database_name)
        .ssl_mode(PgSslMode::Prefer)
        .log_statements(LevelFilter::Debug);
    PoolOptions::default()
        .acquire_timeout(config.acquire_timeout)
        .min_connections(1)
        .max_connections(config.max_connections)
        .connect_lazy_with(db_options)
}
