//! Error types for the subtitle pipeline.

use std::io;

use thiserror::Error;

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, SubtitleError>;

/// Everything that can abort a subtitle fetch.
#[derive(Debug, Error)]
pub enum SubtitleError {
    /// The cookie browser setting is missing or names an unsupported browser.
    #[error("Unsupported cookie browser: {0}. Only 'chrome' is supported")]
    UnsupportedConfiguration(String),

    /// yt-dlp could not be started or exited unsuccessfully.
    #[error("yt-dlp failed: {0}")]
    DownloadFailed(String),

    /// A subtitle file could not be read or parsed.
    #[error("Failed to parse subtitle file {file}: {reason}")]
    ParseFailed { file: String, reason: String },

    /// The per-request working directory could not be created or listed.
    #[error("Working directory error: {0}")]
    WorkDir(#[source] io::Error),
}

impl SubtitleError {
    pub(crate) fn parse_failed(file: impl Into<String>, reason: impl ToString) -> Self {
        Self::ParseFailed {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SubtitleError::UnsupportedConfiguration("firefox".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported cookie browser: firefox. Only 'chrome' is supported"
        );

        let err = SubtitleError::parse_failed("a.en.srt", "bad timing on line 2");
        assert_eq!(
            err.to_string(),
            "Failed to parse subtitle file a.en.srt: bad timing on line 2"
        );
    }
}
