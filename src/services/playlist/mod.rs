//! Playlist synthesis and URL rewriting
//!
//! The service never stores playlists of its own; everything here is
//! derived per request from the bucket contents:
//!
//! - **line.rs** - M3U8 line classification, shared by merger and rewriter
//! - **quality.rs** - bitrate/resolution inference from file names
//! - **master.rs** - master playlist assembly from discovered variants
//! - **merge.rs** - continuous single-sequence merge of all variants
//! - **rewrite.rs** - per-playlist segment presigning

pub mod line;
pub mod master;
pub mod merge;
pub mod quality;
pub mod rewrite;

pub use line::{classify, serialize, ManifestLine};
pub use master::build_master;
pub use merge::{build_continuous, ContinuousManifest};
pub use quality::parse_variant;
pub use rewrite::rewrite_variant;

/// Resolve a segment reference found inside a playlist to a bucket key.
///
/// Relative references resolve against the playlist's own directory;
/// absolute `http(s)` URLs are not bucket keys and are returned as-is.
pub(crate) fn resolve_segment_key(manifest_key: &str, reference: &str) -> Option<String> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return None;
    }
    if let Some(stripped) = reference.strip_prefix('/') {
        return Some(stripped.to_string());
    }
    match manifest_key.rsplit_once('/') {
        Some((dir, _)) => Some(format!("{dir}/{reference}")),
        None => Some(reference.to_string()),
    }
}
