/// Single-playlist segment rewriting
///
/// Returns one variant playlist with every segment reference replaced by
/// a freshly signed URL. Strictly one-to-one and order-preserving; no
/// aggregation, no sorting.
use std::time::Duration;

use futures::future::try_join_all;
use tracing::debug;

use crate::error::Result;
use crate::services::storage::ObjectStore;

use super::line::{classify, serialize, ManifestLine};
use super::resolve_segment_key;

/// Fetch the playlist at `key` and sign each segment reference in place
pub async fn rewrite_variant(
    store: &dyn ObjectStore,
    key: &str,
    ttl: Duration,
) -> Result<String> {
    let content = store.get_object_text(key).await?;
    let mut lines = classify(&content);

    // Signing runs concurrently; results are re-inserted by original
    // line position, not completion order.
    let mut positions: Vec<usize> = Vec::new();
    let mut segment_keys: Vec<String> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if let ManifestLine::SegmentReference(reference) = line {
            if let Some(segment_key) = resolve_segment_key(key, reference) {
                positions.push(index);
                segment_keys.push(segment_key);
            }
        }
    }

    debug!(key, segments = segment_keys.len(), "rewriting playlist");

    let signed = try_join_all(
        segment_keys
            .iter()
            .map(|segment_key| store.presign_get(segment_key, ttl)),
    )
    .await?;

    for (index, url) in positions.into_iter().zip(signed) {
        lines[index] = ManifestLine::SegmentReference(url);
    }

    Ok(serialize(&lines))
}
