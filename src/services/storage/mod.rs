//! Object storage access
//!
//! The `ObjectStore` trait is the seam between the playlist engine and the
//! bucket. The production implementation (`s3::S3ObjectStore`) wraps
//! `aws-sdk-s3`; tests use an in-memory implementation with a small page
//! size to exercise pagination.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use tracing::error;

use crate::error::{AppError, Result};
use crate::models::{ObjectPage, StorageObject};

pub mod s3;

#[cfg(test)]
pub(crate) mod memory;

/// Presigned URL lifetime applied uniformly to segments and download links
pub const PRESIGN_TTL: Duration = Duration::from_secs(3600);

/// Safety bound on listing pagination; a well-behaved store never comes
/// close, so exceeding it is treated as a consistency error rather than
/// looping forever on a misbehaving continuation cursor.
const MAX_LIST_PAGES: usize = 1000;

/// Storage backend abstraction
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one page of the bucket listing under `prefix`, starting at
    /// `token` (None for the first page). A delimiter groups keys the way
    /// the storage protocol defines it.
    async fn list_page(
        &self,
        prefix: Option<&str>,
        delimiter: Option<&str>,
        token: Option<String>,
    ) -> Result<ObjectPage>;

    /// Fetch an object's content as UTF-8 text (playlists are text)
    async fn get_object_text(&self, key: &str) -> Result<String>;

    /// Generate a time-limited signed GET URL for `key`
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String>;
}

/// List every object under `prefix`, following the continuation cursor
/// until the store reports no further pages.
///
/// All-or-nothing: a failed page aborts the whole listing and no partial
/// result is returned. Duplicate keys across pages are dropped.
pub async fn list_all(
    store: &dyn ObjectStore,
    prefix: Option<&str>,
    delimiter: Option<&str>,
) -> Result<Vec<StorageObject>> {
    let mut objects = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut token: Option<String> = None;

    for _ in 0..MAX_LIST_PAGES {
        let page = store.list_page(prefix, delimiter, token.take()).await.map_err(|e| {
            error!(prefix = prefix.unwrap_or(""), "listing page failed: {}", e);
            e
        })?;

        for obj in page.objects {
            if seen.insert(obj.key.clone()) {
                objects.push(obj);
            }
        }

        match page.next_token {
            Some(next) => token = Some(next),
            None => return Ok(objects),
        }
    }

    Err(AppError::Internal(format!(
        "listing under prefix {:?} exceeded {} pages; continuation cursor never drained",
        prefix, MAX_LIST_PAGES
    )))
}

/// Flat file catalog: every key in the bucket ending in `suffix`, in
/// reverse listing order.
///
/// Listing order is whatever the store reports (typically lexicographic),
/// so "most recent first" is a best-effort convention, not a guarantee.
pub async fn list_catalog(store: &dyn ObjectStore, suffix: &str) -> Result<Vec<String>> {
    let objects = list_all(store, None, None).await?;
    let mut keys: Vec<String> = objects
        .into_iter()
        .map(|obj| obj.key)
        .filter(|key| key.ends_with(suffix))
        .collect();
    keys.reverse();
    Ok(keys)
}
