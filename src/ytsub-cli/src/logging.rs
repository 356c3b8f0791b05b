//! Tracing subscriber setup.
//!
//! Everything goes to stderr without ANSI colors: stdout carries the MCP
//! protocol and stderr is usually captured into a client's log file.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::args::LogLevel;

/// `RUST_LOG` wins over `level` when it is set and valid.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
}

pub fn init(level: LogLevel) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
