//! ytsub-mcp - an MCP server that lets a model read YouTube videos.
//!
//! The server speaks newline-delimited JSON-RPC on stdin/stdout and exposes
//! one tool, `download_youtube_url`, which runs yt-dlp and returns the
//! video's English subtitles as deduplicated plain text.
//!
//! - `args` - command-line and environment configuration
//! - `logging` - stderr tracing setup
//! - `tool` - the tool handler

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};
use ytsub_mcp_server::{McpServer, McpServerBuilder};

pub mod args;
pub mod logging;
pub mod tool;

pub use args::{Cli, LOG_LEVEL_ENV, LogLevel};
pub use tool::{DownloadYoutubeUrlTool, TOOL_NAME};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "ytsub-mcp";

const INSTRUCTIONS: &str = "Use download_youtube_url to read what is said in a YouTube video. \
It returns the video's English subtitles as plain text.";

/// Assemble the server around `tool`.
pub fn build_server(tool: DownloadYoutubeUrlTool) -> Result<Arc<McpServer>> {
    McpServerBuilder::new(SERVER_NAME, env!("CARGO_PKG_VERSION"))
        .tool_handler(Arc::new(tool))
        .instructions(INSTRUCTIONS)
        .build()
}

/// Warn when the downloader cannot be resolved. Calls still fail individually
/// with a download error, so this never stops startup.
pub fn check_downloader(program: &Path) -> bool {
    match which::which(program) {
        Ok(resolved) => {
            debug!(path = %resolved.display(), "Found downloader");
            true
        }
        Err(e) => {
            warn!(program = %program.display(), error = %e, "Downloader not found, calls will fail");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytsub_subtitles::SubtitleFetcher;

    #[test]
    fn test_build_server_registers_one_tool() {
        let server = build_server(DownloadYoutubeUrlTool::new(
            Some("chrome"),
            SubtitleFetcher::default(),
        ))
        .unwrap();

        let names: Vec<_> = server.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec![TOOL_NAME]);
        assert_eq!(server.info().name, SERVER_NAME);
        assert!(server.capabilities().tools.is_some());
    }

    #[test]
    fn test_check_downloader_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!check_downloader(&dir.path().join("no-such-yt-dlp")));
    }
}
