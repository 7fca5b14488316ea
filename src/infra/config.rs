//! For reading application configuration.

use config::{builder::DefaultState, ConfigBuilder};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use uuid::Uuid;

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Configuration for the item dump.
    #[serde(default)]
    pub dump: DumpConfig,
}

/// Database configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    /// The database username.
    pub username: String,
    /// The database password.
    pub password: String,
    /// The database port.
    pub port: u16,
    /// The database name.
    pub database_name: String,
    /// The database host.
    pub host: String,
    /// The maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long to wait for a pooled connection.
    #[serde(default = "default_acquire_timeout", with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Logging configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// Which stream human-readable logs go to.
    #[serde(default)]
    pub console: ConsoleTarget,
    /// Where to write JSON log files, if anywhere.
    pub directory: Option<PathBuf>,
}

/// A standard stream to log to.
///
/// Defaults to stderr, since stdout carries the dump output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    /// Standard output.
    Stdout,
    /// Standard error.
    #[default]
    Stderr,
}

/// Configuration for the item dump.
#[derive(Clone, Debug, Deserialize)]
pub struct DumpConfig {
    /// How many items to fetch per query.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Only dump items belonging to this owner.
    pub owner_id: Option<Uuid>,
}

fn default_page_size() -> i64 {
    100
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            owner_id: None,
        }
    }
}

/// Retrieve [`Config`] from the default configuration file and the environment.
#[tracing::instrument]
pub fn load_config() -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("app").separator("__"));
    load_config_from(builder)
}

/// Retrieve [`Config`] from the given sources.
pub fn load_config_from(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Config> {
    let config = builder.build()?.try_deserialize()?;
    Ok(config)
}
