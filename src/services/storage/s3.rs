/// S3-backed `ObjectStore`
///
/// Wraps `aws-sdk-s3` against any S3-compatible endpoint. The client is
/// built once at startup with explicit credentials and shared read-only
/// for the life of the process.
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::config::S3Config;
use crate::error::{AppError, Result};
use crate::models::{ObjectPage, StorageObject};

use super::ObjectStore;

/// Initialize the S3 client with credentials from config
///
/// Uses an explicit endpoint override so S3-compatible stores (MinIO,
/// Cloudflare R2, DigitalOcean Spaces) work the same as AWS proper.
pub async fn get_s3_client(config: &S3Config) -> Client {
    use aws_sdk_s3::config::{Credentials, Region};

    let credentials = Credentials::new(
        &config.access_key_id,
        &config.secret_access_key,
        None, // No session token
        None, // No expiration
        "vod_service_s3",
    );

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.endpoint)
        .load()
        .await;

    Client::new(&aws_config)
}

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_page(
        &self,
        prefix: Option<&str>,
        delimiter: Option<&str>,
        token: Option<String>,
    ) -> Result<ObjectPage> {
        let mut request = self.client.list_objects_v2().bucket(&self.bucket);
        if let Some(prefix) = prefix {
            request = request.prefix(prefix);
        }
        if let Some(delimiter) = delimiter {
            request = request.delimiter(delimiter);
        }
        if let Some(token) = token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("list objects failed: {e}")))?;

        let objects = response
            .contents()
            .iter()
            .filter_map(|obj| {
                let key = obj.key()?.to_string();
                Some(StorageObject {
                    key,
                    size: obj.size().unwrap_or(0),
                    last_modified: obj
                        .last_modified()
                        .and_then(|t| chrono::DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
                })
            })
            .collect();

        Ok(ObjectPage {
            objects,
            next_token: response.next_continuation_token().map(|t| t.to_string()),
        })
    }

    async fn get_object_text(&self, key: &str) -> Result<String> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("get object {key} failed: {e}")))?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("reading object {key} failed: {e}")))?;

        String::from_utf8(body.into_bytes().to_vec())
            .map_err(|e| AppError::Storage(format!("object {key} is not valid UTF-8: {e}")))
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(ttl)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to create presigning config: {e}")))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| AppError::Storage(format!("failed to presign {key}: {e}")))?;

        Ok(presigned_request.uri().to_string())
    }
}
