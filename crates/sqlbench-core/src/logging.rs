//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, ResultExt};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "SQLBENCH_LOG";

/// Used when `SQLBENCH_LOG` is unset or unparsable
const DEFAULT_FILTER: &str = "sqlbench=info,warn";

/// Daily files are named `sqlbench.log.YYYY-MM-DD`
const LOG_FILE_PREFIX: &str = "sqlbench.log";

/// Install the file-only subscriber.
///
/// Nothing is written to stdout or stderr: stdout carries the headless
/// event stream. Filtering follows `SQLBENCH_LOG`, e.g.
/// `SQLBENCH_LOG=sqlbench_app=debug` to see discarded stale responses.
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %log_dir.display(),
        "sqlbench logging initialized"
    );

    Ok(())
}

/// `<data_local_dir>/sqlbench/logs`, or `./sqlbench/logs` when the platform
/// has no data directory
fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sqlbench")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_is_app_scoped() {
        let dir = log_directory();
        assert!(dir.ends_with("sqlbench/logs"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
