//! SubRip (`.srt`) parsing.
//!
//! The parser is lenient in the ways yt-dlp output needs: an optional header
//! before the first cue, cues without an index line, `.` or `,` as the
//! millisecond separator, CRLF line endings and a leading BOM. Text that
//! appears after a cue but outside any timing block is folded into that cue.
//! Only a malformed timing line is an error.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

/// `HH:MM:SS,mmm --> HH:MM:SS,mmm`, optionally followed by cue settings.
static TIMING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d+):(\d{2}):(\d{2})[,.](\d{3})(?:\s.*)?$",
    )
    .expect("Invalid SRT timing regex")
});

/// Errors produced while parsing SRT text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SrtError {
    #[error("malformed timing line {line}: {text:?}")]
    InvalidTiming { line: usize, text: String },
}

/// A single subtitle entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub index: Option<u32>,
    pub start: Duration,
    pub end: Duration,
    pub text: String,
}

/// One parsed unit of a subtitle file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleNode {
    /// Free-form text before the first cue.
    Header(String),
    Cue(Cue),
}

impl SubtitleNode {
    pub fn text(&self) -> &str {
        match self {
            Self::Header(text) => text,
            Self::Cue(cue) => &cue.text,
        }
    }
}

/// Parse SRT content into header and cue nodes, in file order.
pub fn parse_srt(input: &str) -> Result<Vec<SubtitleNode>, SrtError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut nodes: Vec<SubtitleNode> = Vec::new();

    for block in blocks(input) {
        match split_cue_block(&block)? {
            Some(cue) => nodes.push(SubtitleNode::Cue(cue)),
            None => {
                let text = block
                    .iter()
                    .map(|(_, line)| *line)
                    .collect::<Vec<_>>()
                    .join("\n");
                match nodes.last_mut() {
                    Some(SubtitleNode::Cue(cue)) => {
                        if !cue.text.is_empty() {
                            cue.text.push('\n');
                        }
                        cue.text.push_str(&text);
                    }
                    Some(SubtitleNode::Header(header)) => {
                        header.push('\n');
                        header.push_str(&text);
                    }
                    None => nodes.push(SubtitleNode::Header(text)),
                }
            }
        }
    }

    Ok(nodes)
}

/// Group non-blank lines into blocks, keeping 1-based line numbers.
fn blocks(input: &str) -> Vec<Vec<(usize, &str)>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim_end_matches('\r').trim_end();
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push((idx + 1, line));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// An arrow after a leading digit. Anything else with an arrow is cue text.
fn looks_like_timing(line: &str) -> bool {
    line.contains("-->") && line.trim_start().starts_with(|c: char| c.is_ascii_digit())
}

/// Interpret a block as a cue if it has a timing line in first or second position.
fn split_cue_block(block: &[(usize, &str)]) -> Result<Option<Cue>, SrtError> {
    let (index, timing_pos) = match block {
        [(_, first), ..] if looks_like_timing(first) => (None, 0),
        [(_, first), (_, second), ..] if looks_like_timing(second) => {
            match first.trim().parse::<u32>() {
                Ok(index) => (Some(index), 1),
                Err(_) => return Ok(None),
            }
        }
        _ => return Ok(None),
    };

    let (line_no, timing) = block[timing_pos];
    let (start, end) = parse_timing(timing.trim()).ok_or_else(|| SrtError::InvalidTiming {
        line: line_no,
        text: timing.to_string(),
    })?;

    let text = block[timing_pos + 1..]
        .iter()
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Some(Cue {
        index,
        start,
        end,
        text,
    }))
}

fn parse_timing(line: &str) -> Option<(Duration, Duration)> {
    let caps = TIMING_REGEX.captures(line)?;
    let field = |i: usize| -> Option<u64> { caps.get(i)?.as_str().parse().ok() };
    let to_duration = |base: usize| -> Option<Duration> {
        let (h, m, s, ms) = (field(base)?, field(base + 1)?, field(base + 2)?, field(base + 3)?);
        if m >= 60 || s >= 60 {
            return None;
        }
        Some(Duration::from_millis(((h * 60 + m) * 60 + s) * 1000 + ms))
    };
    Some((to_duration(1)?, to_duration(5)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cue_texts(nodes: &[SubtitleNode]) -> Vec<&str> {
        nodes
            .iter()
            .filter_map(|n| match n {
                SubtitleNode::Cue(c) => Some(c.text.as_str()),
                SubtitleNode::Header(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_basic_srt() {
        let srt = "1\n00:00:01,000 --> 00:00:04,000\nHello world\n\n2\n00:00:05,000 --> 00:00:08,500\nTest subtitle\nSecond line\n";
        let nodes = parse_srt(srt).unwrap();

        assert_eq!(nodes.len(), 2);
        match &nodes[1] {
            SubtitleNode::Cue(cue) => {
                assert_eq!(cue.index, Some(2));
                assert_eq!(cue.start, Duration::from_secs(5));
                assert_eq!(cue.end, Duration::from_millis(8500));
                assert_eq!(cue.text, "Test subtitle\nSecond line");
            }
            other => panic!("expected cue, got {other:?}"),
        }
    }

    #[test]
    fn test_header_before_first_cue() {
        let srt = "WEBVTT\nKind: captions\n\n00:00:00.000 --> 00:00:01.000 align:start\nHi\n";
        let nodes = parse_srt(srt).unwrap();

        assert_eq!(nodes[0], SubtitleNode::Header("WEBVTT\nKind: captions".to_string()));
        assert_eq!(cue_texts(&nodes), vec!["Hi"]);
    }

    #[test]
    fn test_crlf_and_bom() {
        let srt = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n\r\n";
        let nodes = parse_srt(srt).unwrap();

        assert_eq!(cue_texts(&nodes), vec!["Hello"]);
    }

    #[test]
    fn test_stray_text_joins_previous_cue() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\nsecond paragraph\n\n2\n00:00:03,000 --> 00:00:04,000\nnext\n";
        let nodes = parse_srt(srt).unwrap();

        assert_eq!(cue_texts(&nodes), vec!["first\nsecond paragraph", "next"]);
    }

    #[test]
    fn test_stray_arrow_text_joins_previous_cue() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\nA --> B\n";
        let nodes = parse_srt(srt).unwrap();

        assert_eq!(cue_texts(&nodes), vec!["first\nA --> B"]);
    }

    #[test]
    fn test_indexed_block_with_stray_arrow_is_text() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\n2\nleft --> right\n";
        let nodes = parse_srt(srt).unwrap();

        assert_eq!(cue_texts(&nodes), vec!["first\n2\nleft --> right"]);
    }

    #[test]
    fn test_empty_cue_text() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:02,000 --> 00:00:03,000\nafter\n";
        let nodes = parse_srt(srt).unwrap();

        assert_eq!(cue_texts(&nodes), vec!["", "after"]);
    }

    #[test]
    fn test_malformed_timing_is_an_error() {
        let srt = "1\n00:00:01,000 --> 00:99:02,000\nHello\n";
        let err = parse_srt(srt).unwrap_err();

        assert_eq!(
            err,
            SrtError::InvalidTiming {
                line: 2,
                text: "00:00:01,000 --> 00:99:02,000".to_string()
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_srt("").unwrap().is_empty());
        assert!(parse_srt("\n\n  \n").unwrap().is_empty());
    }
}
