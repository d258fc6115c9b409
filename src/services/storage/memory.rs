//! In-memory `ObjectStore` used by unit tests
//!
//! Serves listings in lexicographic key order with a configurable page
//! size so pagination paths get exercised, and mints a distinct fake
//! signature on every presign call.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{ObjectPage, StorageObject};

use super::ObjectStore;

pub(crate) struct InMemoryStore {
    objects: BTreeMap<String, String>,
    page_size: usize,
    fail_after: Option<usize>,
    fail_get_keys: Vec<String>,
    endless_cursor: bool,
    pages_served: AtomicUsize,
    sign_nonce: AtomicU64,
}

impl InMemoryStore {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            objects: BTreeMap::new(),
            page_size: page_size.max(1),
            fail_after: None,
            fail_get_keys: Vec::new(),
            endless_cursor: false,
            pages_served: AtomicUsize::new(0),
            sign_nonce: AtomicU64::new(0),
        }
    }

    pub(crate) fn insert(&mut self, key: &str, content: &str) {
        self.objects.insert(key.to_string(), content.to_string());
    }

    /// Make every list page after the first `pages` fail with a storage error
    pub(crate) fn fail_after_pages(&mut self, pages: usize) {
        self.fail_after = Some(pages);
    }

    /// Make `get_object_text` fail for a specific key
    pub(crate) fn fail_get_for(&mut self, key: &str) {
        self.fail_get_keys.push(key.to_string());
    }

    /// Make every list page report a further continuation cursor, so the
    /// listing never drains
    pub(crate) fn endless_cursor(&mut self) {
        self.endless_cursor = true;
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    // Delimiter grouping is not modelled; no test exercises it.
    async fn list_page(
        &self,
        prefix: Option<&str>,
        _delimiter: Option<&str>,
        token: Option<String>,
    ) -> Result<ObjectPage> {
        if let Some(limit) = self.fail_after {
            if self.pages_served.fetch_add(1, Ordering::SeqCst) >= limit {
                return Err(AppError::Storage("injected list failure".to_string()));
            }
        }

        let matching: Vec<&String> = self
            .objects
            .keys()
            .filter(|key| prefix.map_or(true, |p| key.starts_with(p)))
            .filter(|key| token.as_ref().map_or(true, |t| key.as_str() > t.as_str()))
            .collect();

        let page: Vec<StorageObject> = matching
            .iter()
            .take(self.page_size)
            .map(|key| StorageObject {
                key: (*key).clone(),
                size: self.objects[*key].len() as i64,
                last_modified: None,
            })
            .collect();

        let next_token = if self.endless_cursor {
            Some("again".to_string())
        } else if matching.len() > self.page_size {
            page.last().map(|obj| obj.key.clone())
        } else {
            None
        };

        Ok(ObjectPage {
            objects: page,
            next_token,
        })
    }

    async fn get_object_text(&self, key: &str) -> Result<String> {
        if self.fail_get_keys.iter().any(|k| k == key) {
            return Err(AppError::Storage(format!("injected get failure: {key}")));
        }
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::Storage(format!("no such key: {key}")))
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String> {
        let nonce = self.sign_nonce.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "https://cdn.test/{}?X-Amz-Expires={}&X-Amz-Signature=sig{}",
            key,
            ttl.as_secs(),
            nonce
        ))
    }
}
