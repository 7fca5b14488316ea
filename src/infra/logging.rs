//! For setting up logging.

use super::config::{ConsoleTarget, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Flushes logs upon being dropped.
#[derive(Debug)]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initializes logging.
///
/// Logs go to the configured console stream, and additionally as JSON
/// to hourly files if [`LoggingConfig::directory`] is set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LogGuard> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,item_store=debug".into());

    let (non_blocking_console, console_guard) = match config.console {
        ConsoleTarget::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        ConsoleTarget::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };
    let console = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_console)
        .with_filter(EnvFilter::new(&log_level));
    let mut guards = vec![console_guard];

    let file = config.directory.as_ref().map(|directory| {
        let file_appender = tracing_appender::rolling::hourly(directory, "log.");
        let (non_blocking_file_appender, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking_file_appender)
            .json()
            .with_filter(EnvFilter::new(&log_level))
    });

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(LogGuard { _guards: guards })
}
