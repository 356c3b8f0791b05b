//! Invoking the external subtitle downloader.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::browser::CookieBrowser;
use crate::error::{Result, SubtitleError};

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "yt-dlp";

/// Subtitle language requested from the downloader.
pub const SUBTITLE_LANGUAGE: &str = "en";

/// Number of trailing stderr lines kept in a failure message.
const STDERR_TAIL_LINES: usize = 20;

/// Something that fills a directory with subtitle files for a URL.
#[async_trait::async_trait]
pub trait SubtitleDownloader: Send + Sync {
    /// Download subtitles for `url` into `workdir`, returning once the
    /// files are complete.
    async fn download(&self, url: &str, browser: CookieBrowser, workdir: &Path) -> Result<()>;
}

/// The `yt-dlp` command-line downloader.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Fixed argument list: English manual and automatic subtitles as SRT,
    /// no media.
    pub fn args(url: &str, browser: CookieBrowser) -> Vec<OsString> {
        [
            "--write-subs",
            "--write-auto-subs",
            "--sub-langs",
            SUBTITLE_LANGUAGE,
            "--skip-download",
            "--sub-format",
            "srt",
            "--convert-subs",
            "srt",
            "--cookies-from-browser",
            browser.as_str(),
        ]
        .into_iter()
        .map(OsString::from)
        .chain(std::iter::once(OsString::from(url)))
        .collect()
    }
}

#[async_trait::async_trait]
impl SubtitleDownloader for YtDlp {
    async fn download(&self, url: &str, browser: CookieBrowser, workdir: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        // stdout is captured: the server's own stdout carries protocol messages.
        cmd.args(Self::args(url, browser))
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(program = %self.program.display(), url, "Launching downloader");
        let output = cmd.output().await.map_err(|e| {
            SubtitleError::DownloadFailed(format!(
                "could not run {}: {e}",
                self.program.display()
            ))
        })?;

        debug!(status = %output.status, "Downloader exited");
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = stderr_tail(&stderr);
        Err(SubtitleError::DownloadFailed(if tail.is_empty() {
            output.status.to_string()
        } else {
            format!("{}: {tail}", output.status)
        }))
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
