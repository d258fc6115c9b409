/// Naming-convention quality parser
///
/// Variant playlists encode their rendition in the file name:
/// `movie_1280x720_2000k.m3u8` means 1280x720 at 2000 kbit/s. Files that
/// do not follow the convention yield no descriptor and are skipped by the
/// master playlist builder.
use std::sync::LazyLock;

use regex::Regex;

use crate::models::VariantDescriptor;

/// Matches `_<width>x<height>_<bitrateKbps>k` immediately before the
/// file extension.
static QUALITY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(\d+)x(\d+)_(\d+)k\.\w+$").expect("Invalid quality regex"));

/// Derive a `VariantDescriptor` from a playlist key
///
/// Returns `None` for any mismatch (wrong delimiter, non-numeric capture,
/// missing suffix); absence is not an error.
pub fn parse_variant(key: &str) -> Option<VariantDescriptor> {
    let captures = QUALITY_SUFFIX.captures(key)?;

    let width: u64 = captures.get(1)?.as_str().parse().ok()?;
    let height: u64 = captures.get(2)?.as_str().parse().ok()?;
    let bitrate_kbps: u64 = captures.get(3)?.as_str().parse().ok()?;

    Some(VariantDescriptor {
        key: key.to_string(),
        bandwidth: bitrate_kbps * 1000,
        resolution: format!("{}x{}", width, height),
    })
}
