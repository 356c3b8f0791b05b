//! Browser whose cookie store yt-dlp reads credentials from.

use std::fmt;
use std::str::FromStr;

use crate::error::SubtitleError;

/// Supported cookie browsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookieBrowser {
    Chrome,
}

impl CookieBrowser {
    /// Name as yt-dlp expects it in `--cookies-from-browser`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
        }
    }

    /// Validate an optional configured value.
    ///
    /// A missing value is reported the same way as an unsupported one.
    pub fn from_config(value: Option<&str>) -> Result<Self, SubtitleError> {
        match value {
            Some(name) => name.parse(),
            None => Err(SubtitleError::UnsupportedConfiguration(
                "(not set)".to_string(),
            )),
        }
    }
}

impl FromStr for CookieBrowser {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("chrome") {
            Ok(Self::Chrome)
        } else {
            Err(SubtitleError::UnsupportedConfiguration(s.to_string()))
        }
    }
}

impl fmt::Display for CookieBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
