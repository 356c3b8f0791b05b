//! Command-line and environment configuration.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ytsub_subtitles::{BannerLayout, DEFAULT_PROGRAM, SubtitleFetcher, YtDlp};

use crate::tool::DownloadYoutubeUrlTool;

/// Environment fallback for `--log-level`.
pub const LOG_LEVEL_ENV: &str = "YTSUB_LOG_LEVEL";

/// Log verbosity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_str_loose(s)
        .ok_or_else(|| format!("unknown log level '{s}' (expected error, warn, info, debug or trace)"))
}

/// MCP stdio server exposing a single `download_youtube_url` tool.
#[derive(Debug, Parser)]
#[command(name = "ytsub-mcp", version, about)]
pub struct Cli {
    /// Browser to read YouTube cookies from. Only `chrome` is supported.
    #[arg(
        long = "cookie-browser",
        env = "EXTRACT_COOKIE_FROM_BROWSER_NAME",
        value_name = "NAME"
    )]
    pub cookie_browser: Option<String>,

    /// yt-dlp executable, looked up on PATH when not a path.
    #[arg(
        long = "yt-dlp",
        env = "YT_DLP_PATH",
        value_name = "PATH",
        default_value = DEFAULT_PROGRAM
    )]
    pub yt_dlp: PathBuf,

    /// Directory that per-request working directories are created in.
    #[arg(long = "temp-dir", env = "YTSUB_TEMP_DIR", value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Give every subtitle file its own banner instead of nesting earlier
    /// files under later ones.
    #[arg(long = "per-file-banners")]
    pub per_file_banners: bool,

    /// Set log verbosity level (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        env = LOG_LEVEL_ENV,
        value_name = "LEVEL",
        value_parser = parse_log_level
    )]
    pub log_level: Option<LogLevel>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the log level: `--verbose`, then `--log-level` (or its
    /// environment fallback), then `info`.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            return LogLevel::Debug;
        }
        self.log_level.unwrap_or_default()
    }

    pub fn banner_layout(&self) -> BannerLayout {
        if self.per_file_banners {
            BannerLayout::PerFile
        } else {
            BannerLayout::Nested
        }
    }

    pub fn fetcher(&self) -> SubtitleFetcher {
        let mut fetcher = SubtitleFetcher::new(Arc::new(YtDlp::new(&self.yt_dlp)))
            .with_layout(self.banner_layout());
        if let Some(dir) = &self.temp_dir {
            fetcher = fetcher.with_temp_root(dir);
        }
        fetcher
    }

    /// Build the tool handler; the cookie browser is validated here, once.
    pub fn tool(&self) -> DownloadYoutubeUrlTool {
        DownloadYoutubeUrlTool::new(self.cookie_browser.as_deref(), self.fetcher())
    }
}
