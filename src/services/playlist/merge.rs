/// Continuous playlist merge
///
/// Concatenates every variant playlist under a prefix into one gap-free
/// on-demand playlist with a single rising media sequence. Variants are
/// processed in lexicographic key order so the result is deterministic
/// regardless of listing order.
use std::time::Duration;

use futures::future::try_join_all;
use tracing::debug;

use crate::error::Result;
use crate::services::storage::{list_all, ObjectStore};

use super::line::{classify, ManifestLine};
use super::resolve_segment_key;

/// What a segment line rewrites to: a bucket key needing a signature, or
/// an already-absolute URL passed through untouched.
enum SignTarget {
    Key(String),
    Url(String),
}

/// Accumulator for the merged playlist
///
/// Each pushed segment is assigned the next media-sequence index,
/// starting at zero, strictly increasing across source playlists with no
/// gaps or resets. Emitted once as immutable text via `into_text`.
pub struct ContinuousManifest {
    entries: Vec<SegmentEntry>,
}

struct SegmentEntry {
    timing: Option<String>,
    uri: String,
}

impl ContinuousManifest {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one segment, preserving its `#EXTINF` timing line verbatim
    /// when present. Returns the media-sequence index assigned.
    pub fn push_segment(&mut self, timing: Option<String>, uri: String) -> u64 {
        let sequence = self.entries.len() as u64;
        self.entries.push(SegmentEntry { timing, uri });
        sequence
    }

    pub fn segment_count(&self) -> usize {
        self.entries.len()
    }

    /// Serialize: fixed header block, segments in push order, terminator
    pub fn into_text(self) -> String {
        let mut playlist = String::from("#EXTM3U\n");
        playlist.push_str("#EXT-X-VERSION:3\n");
        playlist.push_str("#EXT-X-PLAYLIST-TYPE:VOD\n");
        playlist.push_str("#EXT-X-MEDIA-SEQUENCE:0\n");
        for entry in &self.entries {
            if let Some(timing) = &entry.timing {
                playlist.push_str(timing);
                playlist.push('\n');
            }
            playlist.push_str(&entry.uri);
            playlist.push('\n');
        }
        playlist.push_str("#EXT-X-ENDLIST\n");
        playlist
    }
}

impl Default for ContinuousManifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge every variant playlist under `prefix` into one continuous
/// on-demand playlist with all segment references signed.
///
/// All-or-nothing: a fetch failure on any variant aborts the whole merge
/// rather than emitting a playlist with a gap.
pub async fn build_continuous(
    store: &dyn ObjectStore,
    prefix: &str,
    manifest_extension: &str,
    ttl: Duration,
) -> Result<String> {
    let objects = list_all(store, Some(prefix), None).await?;

    let mut keys: Vec<String> = objects
        .into_iter()
        .map(|obj| obj.key)
        .filter(|key| key.ends_with(manifest_extension))
        .collect();
    keys.sort();

    // Collect (timing, target) pairs across all variants in final order
    // before signing anything, so signing can run concurrently while the
    // output keeps original positions.
    let mut segments: Vec<(Option<String>, SignTarget)> = Vec::new();
    for key in &keys {
        let content = store.get_object_text(key).await?;
        let mut pending_timing: Option<String> = None;
        for line in classify(&content) {
            match line {
                ManifestLine::Metadata(text) => {
                    if text.starts_with("#EXTINF") {
                        pending_timing = Some(text);
                    }
                }
                ManifestLine::SegmentReference(reference) => {
                    let target = match resolve_segment_key(key, &reference) {
                        Some(segment_key) => SignTarget::Key(segment_key),
                        None => SignTarget::Url(reference),
                    };
                    segments.push((pending_timing.take(), target));
                }
                ManifestLine::Comment(_) | ManifestLine::Blank => {}
            }
        }
    }

    debug!(
        prefix,
        variants = keys.len(),
        segments = segments.len(),
        "merging variant playlists"
    );

    let signed = try_join_all(segments.iter().map(|(_, target)| async move {
        match target {
            SignTarget::Key(segment_key) => store.presign_get(segment_key, ttl).await,
            SignTarget::Url(url) => Ok(url.clone()),
        }
    }))
    .await?;

    let mut merged = ContinuousManifest::new();
    for ((timing, _), uri) in segments.into_iter().zip(signed) {
        merged.push_segment(timing, uri);
    }

    Ok(merged.into_text())
}
