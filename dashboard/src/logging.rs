use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes logging to a daily rolling file.
///
/// The terminal belongs to the dashboard, so nothing is written to stdout.
/// `RUST_LOG` takes precedence over the configured level. Keep the returned
/// guard alive until exit so buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    fs::create_dir_all(&config.directory).with_context(|| {
        format!(
            "Failed to create log directory '{}'",
            config.directory.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install the log subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dropping_guard_flushes_log_file() {
        let dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            directory: dir.path().join("logs"),
            file_name: "dashboard-test.log".to_string(),
            level: "info".to_string(),
        };

        let guard = init_logging(&config).unwrap();
        tracing::error!("upload failed at model stage");
        drop(guard);

        let contents: String = fs::read_dir(&config.directory)
            .unwrap()
            .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(contents.contains("upload failed at model stage"));
    }
}
