//! Turning parsed subtitle files into one deduplicated plain-text transcript.

use std::collections::HashSet;

use crate::srt::SubtitleNode;

/// Width of the `=` rule under each file name.
pub const BANNER_WIDTH: usize = 40;

/// How per-file output is combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BannerLayout {
    /// Each file is appended to the running transcript, the whole transcript is
    /// deduplicated, and the file's banner is put on top. Earlier files end up
    /// nested under the last file's banner.
    #[default]
    Nested,
    /// Each file is deduplicated on its own under its own banner; sections are
    /// separated by a blank line.
    PerFile,
}

/// Keep the first occurrence of every distinct trimmed, non-empty line.
pub fn dedupe_lines(text: &str) -> String {
    let mut seen = HashSet::new();
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn banner(file_name: &str, body: &str) -> String {
    format!("{file_name}\n{}\n{body}", "=".repeat(BANNER_WIDTH))
}

/// Header texts first, then cue texts, in file order.
fn node_texts(nodes: &[SubtitleNode]) -> impl Iterator<Item = &str> {
    let headers = nodes
        .iter()
        .filter(|n| matches!(n, SubtitleNode::Header(_)))
        .map(SubtitleNode::text);
    let cues = nodes
        .iter()
        .filter(|n| matches!(n, SubtitleNode::Cue(_)))
        .map(SubtitleNode::text);
    headers.chain(cues)
}

/// Accumulates parsed files into the final transcript.
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    layout: BannerLayout,
    text: String,
    sections: Vec<String>,
}

impl TranscriptBuilder {
    pub fn new(layout: BannerLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Add one file's nodes under `file_name`.
    pub fn push_file(&mut self, file_name: &str, nodes: &[SubtitleNode]) {
        match self.layout {
            BannerLayout::Nested => {
                if !self.text.is_empty() && !self.text.ends_with('\n') {
                    self.text.push('\n');
                }
                for text in node_texts(nodes) {
                    self.text.push_str(text);
                    self.text.push('\n');
                }
                let deduped = dedupe_lines(&self.text);
                self.text = banner(file_name, &deduped);
            }
            BannerLayout::PerFile => {
                let own = node_texts(nodes).collect::<Vec<_>>().join("\n");
                self.sections.push(banner(file_name, &dedupe_lines(&own)));
            }
        }
    }

    pub fn finish(self) -> String {
        match self.layout {
            BannerLayout::Nested => self.text,
            BannerLayout::PerFile => self.sections.join("\n\n"),
        }
    }
}
