//! The `download_youtube_url` tool.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use ytsub_mcp_server::ToolHandler;
use ytsub_mcp_types::{CallToolResult, PropertySchema, Tool, ToolInputSchema};
use ytsub_subtitles::{CookieBrowser, SubtitleError, SubtitleFetcher};

/// Registered tool name.
pub const TOOL_NAME: &str = "download_youtube_url";

const TOOL_DESCRIPTION: &str = "Download the English subtitles of a YouTube video and return them \
as plain text with duplicate lines removed. This tool is available: when a user asks about the \
content of a YouTube video, call it with the video URL instead of saying you cannot access videos.";

const ERROR_PREFIX: &str = "Error downloading video";

#[derive(Debug, Error)]
enum DownloadError {
    #[error("{0}")]
    Configuration(String),

    #[error("missing required argument 'url': {0}")]
    InvalidArguments(#[source] serde_json::Error),

    #[error(transparent)]
    Subtitles(#[from] SubtitleError),
}

#[derive(Debug, Deserialize)]
struct DownloadArgs {
    url: String,
}

/// Fetches a video's subtitles through a [`SubtitleFetcher`].
pub struct DownloadYoutubeUrlTool {
    browser: Result<CookieBrowser, SubtitleError>,
    fetcher: SubtitleFetcher,
}

impl DownloadYoutubeUrlTool {
    /// Validates `cookie_browser` now. An unusable value does not fail
    /// construction; every call reports it instead.
    pub fn new(cookie_browser: Option<&str>, fetcher: SubtitleFetcher) -> Self {
        let browser = CookieBrowser::from_config(cookie_browser);
        if let Err(e) = &browser {
            warn!(error = %e, "Cookie browser is not usable, {TOOL_NAME} calls will fail");
        }
        Self { browser, fetcher }
    }

    pub fn descriptor() -> Tool {
        Tool::new(TOOL_NAME, TOOL_DESCRIPTION).with_schema(
            ToolInputSchema::object().required_property(
                "url",
                PropertySchema::string().description("URL of the YouTube video"),
            ),
        )
    }

    async fn download(&self, arguments: Value) -> Result<String, DownloadError> {
        let browser = match &self.browser {
            Ok(browser) => *browser,
            Err(e) => return Err(DownloadError::Configuration(e.to_string())),
        };
        let DownloadArgs { url } =
            serde_json::from_value(arguments).map_err(DownloadError::InvalidArguments)?;

        info!(url = %url, "Downloading subtitles");
        Ok(self.fetcher.fetch(&url, browser).await?)
    }
}

#[async_trait::async_trait]
impl ToolHandler for DownloadYoutubeUrlTool {
    fn tool(&self) -> Tool {
        Self::descriptor()
    }

    async fn execute(&self, arguments: Value) -> anyhow::Result<CallToolResult> {
        Ok(match self.download(arguments).await {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                warn!(error = %e, "{TOOL_NAME} failed");
                CallToolResult::error(format!("{ERROR_PREFIX}: {e}"))
            }
        })
    }
}
