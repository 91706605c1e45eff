//! tracing subscriber setup for the binary

use anyhow::{Context, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::log_path;

const DEFAULT_LOG_FILTER: &str = "mod_version_check=info";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Write to stderr instead of the log file
    pub stderr: bool,
    pub json: bool,
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(options: LogOptions) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (writer, guard) = if options.stderr {
        tracing_appender::non_blocking(std::io::stderr())
    } else {
        let path = log_path();
        let dir = path.parent().context("log path has no parent directory")?;
        let file_name = path.file_name().context("log path has no file name")?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);

    let installed = if options.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
