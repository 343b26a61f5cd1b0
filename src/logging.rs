// Logging setup - tracing subscriber writing to a file, stderr, or nowhere
//
// The TUI owns the terminal, so it must never log to stderr.

use crate::config::AppConfig;
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Configured file, or discard
    FileOnly,
    /// Configured file, or stderr
    FileOrStderr,
}

pub fn init_logging(config: &AppConfig, target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match (&config.log_file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, LogTarget::FileOrStderr) => builder.with_writer(std::io::stderr).try_init(),
        (None, LogTarget::FileOnly) => builder.with_writer(std::io::sink).try_init(),
    };

    installed.map_err(|e| anyhow!("installing log subscriber: {}", e))
}
