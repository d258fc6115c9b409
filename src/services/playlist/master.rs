/// Master playlist assembly
///
/// Discovers variant playlists under the stream prefix, derives quality
/// metadata from their file names, and emits an HLS master playlist
/// referencing each variant by its prefix-relative path.
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::VariantDescriptor;
use crate::services::storage::{list_all, ObjectStore};

use super::quality::parse_variant;

/// Build the master playlist for every parseable variant under `prefix`
///
/// Files that fail the naming convention are skipped with a diagnostic;
/// zero qualifying variants is a distinct not-found condition, never an
/// empty 200 body. Variants are emitted sorted by bandwidth ascending for
/// player compatibility.
pub async fn build_master(
    store: &dyn ObjectStore,
    prefix: &str,
    manifest_extension: &str,
) -> Result<String> {
    let objects = list_all(store, Some(prefix), None).await?;

    let mut variants: Vec<VariantDescriptor> = Vec::new();
    for obj in &objects {
        if !obj.key.ends_with(manifest_extension) {
            continue;
        }
        match parse_variant(&obj.key) {
            Some(descriptor) => variants.push(descriptor),
            None => {
                warn!(key = %obj.key, "skipping playlist without quality suffix");
            }
        }
    }

    if variants.is_empty() {
        return Err(AppError::NotFound(format!(
            "no valid streams under prefix {prefix}"
        )));
    }

    variants.sort_by_key(|v| v.bandwidth);

    debug!(prefix, count = variants.len(), "building master playlist");

    let mut playlist = String::from("#EXTM3U\n");
    playlist.push_str("#EXT-X-VERSION:3\n");
    for variant in &variants {
        let relative = variant.key.strip_prefix(prefix).unwrap_or(&variant.key);
        playlist.push_str(&format!(
            "#EXT-X-STREAM-INF:BANDWIDTH={},RESOLUTION={}\n",
            variant.bandwidth, variant.resolution
        ));
        playlist.push_str(&format!("{relative}\n"));
    }

    Ok(playlist)
}
