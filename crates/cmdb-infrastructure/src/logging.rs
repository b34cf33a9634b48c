//! Tracing subscriber setup for the `cmdb` binary.
//!
//! Logs go to a daily rolling file (`cmdb.log.YYYY-MM-DD`) so they never
//! interleave with table output or the chat prompt. Verbose mode mirrors
//! them to stderr.

use cmdb_core::{CmdbError, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_PREFIX: &str = "cmdb.log";

#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for the rolling log file.
    pub logs_dir: PathBuf,
    /// Mirror log lines to stderr.
    pub verbose: bool,
}

/// Builds the filter: `RUST_LOG` wins, then the configured directive.
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| CmdbError::config(format!("Invalid log level '{}': {}", level, e))),
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes buffered lines on drop and must be held until
/// the process exits.
pub fn init_tracing(options: &LoggingOptions) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&options.logs_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(&options.logs_dir)
        .map_err(|e| CmdbError::io(format!("Failed to open log file: {}", e)))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    let stderr_layer = options.verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(&options.level)?)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| CmdbError::internal(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::info!(
        logs_dir = %options.logs_dir.display(),
        "[Logging] Tracing initialized"
    );
    Ok(guard)
}
