/// File catalog handlers - flat listing and direct download links
use actix_web::{web, HttpResponse};

use crate::config::Config;
use crate::error::Result;
use crate::models::PresignedUrlResponse;
use crate::services::storage::{self, ObjectStore, PRESIGN_TTL};

/// List every catalog file in the bucket, most recently listed first
pub async fn list_files(
    store: web::Data<dyn ObjectStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    let keys =
        storage::list_catalog(store.get_ref(), &config.media.catalog_extension).await?;
    Ok(HttpResponse::Ok().json(keys))
}

/// Return a time-limited download URL for a single object
pub async fn presigned_url(
    store: web::Data<dyn ObjectStore>,
    file_name: web::Path<String>,
) -> Result<HttpResponse> {
    let url = store.presign_get(&file_name, PRESIGN_TTL).await?;
    Ok(HttpResponse::Ok().json(PresignedUrlResponse { url }))
}
