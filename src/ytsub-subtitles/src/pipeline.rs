//! The fetch-and-normalize pipeline: download into a scratch directory, parse
//! every file, build the transcript, remove the directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::browser::CookieBrowser;
use crate::downloader::{SubtitleDownloader, YtDlp};
use crate::error::{Result, SubtitleError};
use crate::normalize::{BannerLayout, TranscriptBuilder};
use crate::srt::{SubtitleNode, parse_srt};
use crate::workdir::WorkDir;

/// Fetches subtitles for a URL and returns them as deduplicated plain text.
#[derive(Clone)]
pub struct SubtitleFetcher {
    downloader: Arc<dyn SubtitleDownloader>,
    temp_root: Option<PathBuf>,
    layout: BannerLayout,
}

impl Default for SubtitleFetcher {
    fn default() -> Self {
        Self::new(Arc::new(YtDlp::default()))
    }
}

impl SubtitleFetcher {
    pub fn new(downloader: Arc<dyn SubtitleDownloader>) -> Self {
        Self {
            downloader,
            temp_root: None,
            layout: BannerLayout::default(),
        }
    }

    /// Create working directories under `root` instead of the OS temp root.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    pub fn with_layout(mut self, layout: BannerLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> BannerLayout {
        self.layout
    }

    /// Run the pipeline once. The working directory is gone when this returns,
    /// on success and on every error.
    pub async fn fetch(&self, url: &str, browser: CookieBrowser) -> Result<String> {
        let workdir = WorkDir::create(self.temp_root.as_deref())?;
        let transcript = self.fetch_in(url, browser, &workdir).await;
        workdir.close();
        transcript
    }

    async fn fetch_in(&self, url: &str, browser: CookieBrowser, workdir: &WorkDir) -> Result<String> {
        self.downloader
            .download(url, browser, workdir.path())
            .await?;

        let files = workdir.files().await?;
        let mut transcript = TranscriptBuilder::new(self.layout);
        for path in &files {
            let name = file_name(path);
            let nodes = read_subtitle_file(path, &name).await?;
            debug!(file = %name, nodes = nodes.len(), "Parsed subtitle file");
            transcript.push_file(&name, &nodes);
        }

        let text = transcript.finish();
        info!(url, files = files.len(), bytes = text.len(), "Fetched subtitles");
        Ok(text)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn read_subtitle_file(path: &Path, name: &str) -> Result<Vec<SubtitleNode>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| SubtitleError::parse_failed(name, e))?;
    let content = String::from_utf8(bytes)
        .map_err(|_| SubtitleError::parse_failed(name, "file is not valid UTF-8"))?;
    parse_srt(&content).map_err(|e| SubtitleError::parse_failed(name, e))
}
