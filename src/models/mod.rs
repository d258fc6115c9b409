/// Value types shared across the service
///
/// The raw storage SDK response shapes never cross the storage boundary;
/// only these explicit types do, holding exactly the fields the service
/// consumes.
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single object as reported by the bucket listing
#[derive(Debug, Clone)]
pub struct StorageObject {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// One page of a bucket listing plus its continuation cursor
///
/// The cursor never leaves the lister; callers only ever see the frozen,
/// aggregated key set.
#[derive(Debug, Default)]
pub struct ObjectPage {
    pub objects: Vec<StorageObject>,
    pub next_token: Option<String>,
}

/// Quality metadata derived from a variant playlist file name
///
/// Only produced with both fields populated; a file name that does not
/// match the naming convention yields no descriptor at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub key: String,
    /// Peak bandwidth in bits per second
    pub bandwidth: u64,
    /// "WxH", e.g. "1280x720"
    pub resolution: String,
}

/// Response body for `GET /presigned-url/{file_name}`
#[derive(Debug, Serialize)]
pub struct PresignedUrlResponse {
    pub url: String,
}
