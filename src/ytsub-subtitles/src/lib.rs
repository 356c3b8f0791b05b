//! ytsub subtitles - fetch a video's English subtitles with yt-dlp and reduce
//! them to deduplicated plain text.
//!
//! The pipeline per request:
//! 1. create a uniquely named scratch directory ([`WorkDir`])
//! 2. run the downloader inside it ([`SubtitleDownloader`], [`YtDlp`])
//! 3. parse every file it produced ([`parse_srt`])
//! 4. fold the files into one transcript ([`TranscriptBuilder`])
//! 5. remove the directory, whatever happened above
//!
//! # Example
//! ```rust,no_run
//! use ytsub_subtitles::{CookieBrowser, SubtitleFetcher};
//!
//! # async fn run() -> ytsub_subtitles::Result<()> {
//! let text = SubtitleFetcher::default()
//!     .fetch("https://www.youtube.com/watch?v=dQw4w9WgXcQ", CookieBrowser::Chrome)
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

mod browser;
mod downloader;
mod error;
mod normalize;
mod pipeline;
mod srt;
mod workdir;

pub use browser::CookieBrowser;
pub use downloader::{DEFAULT_PROGRAM, SUBTITLE_LANGUAGE, SubtitleDownloader, YtDlp};
pub use error::{Result, SubtitleError};
pub use normalize::{BANNER_WIDTH, BannerLayout, TranscriptBuilder, dedupe_lines};
pub use pipeline::SubtitleFetcher;
pub use srt::{Cue, SrtError, SubtitleNode, parse_srt};
pub use workdir::{WORKDIR_PREFIX, WorkDir};
