/// M3U8 line classification
///
/// Shared primitive for the merger and the single-playlist rewriter. The
/// classification is lossless: every input line maps to exactly one
/// `ManifestLine`, and re-serializing reproduces the content (modulo any
/// rewritten segment references).
use std::fmt;

/// One line of a playlist, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    /// `#EXT...` protocol tag (e.g. `#EXTINF:6.0,`)
    Metadata(String),
    /// `#`-prefixed line that is not a protocol tag
    Comment(String),
    /// Reference to a media segment: a bucket key, relative path, or URL
    SegmentReference(String),
    Blank,
}

impl fmt::Display for ManifestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestLine::Metadata(text) | ManifestLine::Comment(text) => f.write_str(text),
            ManifestLine::SegmentReference(reference) => f.write_str(reference),
            ManifestLine::Blank => Ok(()),
        }
    }
}

/// Classify raw playlist text into an ordered sequence of lines
pub fn classify(raw: &str) -> Vec<ManifestLine> {
    raw.lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                ManifestLine::Blank
            } else if trimmed.starts_with("#EXT") {
                ManifestLine::Metadata(trimmed.to_string())
            } else if trimmed.starts_with('#') {
                ManifestLine::Comment(trimmed.to_string())
            } else {
                ManifestLine::SegmentReference(trimmed.to_string())
            }
        })
        .collect()
}

/// Re-join classified lines into playlist text, preserving order
pub fn serialize(lines: &[ManifestLine]) -> String {
    let mut text = lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}
