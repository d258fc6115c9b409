/// HLS streaming handlers
///
/// Playlist bodies are synthesized per request from the bucket contents;
/// nothing is cached, so every response carries freshly expiring segment
/// links.
use actix_web::{web, HttpResponse};

use crate::config::Config;
use crate::error::Result;
use crate::services::playlist::{build_continuous, build_master, rewrite_variant};
use crate::services::storage::{self, ObjectStore, PRESIGN_TTL};

const HLS_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";

/// List request-relative URLs for every variant playlist under the
/// stream prefix
pub async fn list_streams(
    store: web::Data<dyn ObjectStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    let objects =
        storage::list_all(store.get_ref(), Some(&config.media.stream_prefix), None).await?;

    let urls: Vec<String> = objects
        .into_iter()
        .map(|obj| obj.key)
        .filter(|key| key.ends_with(&config.media.manifest_extension))
        .map(|key| {
            let relative = key
                .strip_prefix(&config.media.stream_prefix)
                .unwrap_or(&key)
                .split('/')
                .map(|part| urlencoding::encode(part).into_owned())
                .collect::<Vec<_>>()
                .join("/");
            format!("/streams/{relative}")
        })
        .collect();

    Ok(HttpResponse::Ok().json(urls))
}

/// Master playlist covering every variant that parses under the naming
/// convention; 404 when none do
pub async fn master_playlist(
    store: web::Data<dyn ObjectStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    let playlist = build_master(
        store.get_ref(),
        &config.media.stream_prefix,
        &config.media.manifest_extension,
    )
    .await?;

    Ok(HttpResponse::Ok()
        .content_type(HLS_CONTENT_TYPE)
        .body(playlist))
}

/// One continuous on-demand playlist merging every variant under the
/// prefix, all segments signed
pub async fn continuous_playlist(
    store: web::Data<dyn ObjectStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    let playlist = build_continuous(
        store.get_ref(),
        &config.media.stream_prefix,
        &config.media.manifest_extension,
        PRESIGN_TTL,
    )
    .await?;

    Ok(HttpResponse::Ok()
        .content_type(HLS_CONTENT_TYPE)
        .body(playlist))
}

/// One variant playlist with every segment reference signed
pub async fn variant_playlist(
    store: web::Data<dyn ObjectStore>,
    config: web::Data<Config>,
    file_name: web::Path<String>,
) -> Result<HttpResponse> {
    let key = format!("{}{}", config.media.stream_prefix, file_name);
    let playlist = rewrite_variant(store.get_ref(), &key, PRESIGN_TTL).await?;

    Ok(HttpResponse::Ok()
        .content_type(HLS_CONTENT_TYPE)
        .body(playlist))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    use super::*;
    use crate::config::{AppConfig, MediaConfig, S3Config};
    use crate::services::storage::memory::InMemoryStore;

    fn test_config() -> Config {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            s3: S3Config {
                endpoint: "http://localhost:9000".to_string(),
                access_key_id: "test".to_string(),
                secret_access_key: "test".to_string(),
                bucket: "media".to_string(),
                region: "ap-southeast-1".to_string(),
            },
            media: MediaConfig {
                stream_prefix: "streams/".to_string(),
                catalog_extension: ".mp4".to_string(),
                manifest_extension: ".m3u8".to_string(),
            },
        }
    }

    macro_rules! spawn_app {
        ($store:expr) => {{
            let store: Arc<dyn ObjectStore> = Arc::new($store);
            test::init_service(
                App::new()
                    .app_data(web::Data::from(store))
                    .app_data(web::Data::new(test_config()))
                    .route("/streams", web::get().to(list_streams))
                    .route("/streams/master", web::get().to(master_playlist))
                    .route("/streams/all", web::get().to(continuous_playlist))
                    .route("/streams/{file_name:.*}", web::get().to(variant_playlist)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_list_streams_returns_relative_urls() {
        let mut store = InMemoryStore::new(2);
        store.insert("streams/show/ep1_640x360_500k.m3u8", "#EXTM3U");
        store.insert("streams/seg.ts", "");
        let app = spawn_app!(store);

        let req = test::TestRequest::get().uri("/streams").to_request();
        let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, vec!["/streams/show/ep1_640x360_500k.m3u8"]);
    }

    #[actix_web::test]
    async fn test_master_playlist_content_type() {
        let mut store = InMemoryStore::new(2);
        store.insert("streams/a_640x360_500k.m3u8", "#EXTM3U");
        let app = spawn_app!(store);

        let req = test::TestRequest::get().uri("/streams/master").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/vnd.apple.mpegurl"
        );
    }

    #[actix_web::test]
    async fn test_master_with_no_valid_streams_is_404() {
        let mut store = InMemoryStore::new(2);
        store.insert("streams/bogus.m3u8", "#EXTM3U");
        let app = spawn_app!(store);

        let req = test::TestRequest::get().uri("/streams/master").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("no valid streams"));
    }

    #[actix_web::test]
    async fn test_variant_playlist_signs_segments() {
        let mut store = InMemoryStore::new(2);
        store.insert(
            "streams/a_640x360_500k.m3u8",
            "#EXTM3U\n#EXTINF:6.0,\nseg0.ts\n#EXT-X-ENDLIST\n",
        );
        let app = spawn_app!(store);

        let req = test::TestRequest::get()
            .uri("/streams/a_640x360_500k.m3u8")
            .to_request();
        let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(body.contains("https://cdn.test/streams/seg0.ts?"));
    }

    #[actix_web::test]
    async fn test_continuous_playlist_merges_variants() {
        let mut store = InMemoryStore::new(2);
        store.insert(
            "streams/a_640x360_500k.m3u8",
            "#EXTM3U\n#EXTINF:6.0,\na0.ts\n#EXT-X-ENDLIST\n",
        );
        store.insert(
            "streams/b_1280x720_2000k.m3u8",
            "#EXTM3U\n#EXTINF:6.0,\nb0.ts\n#EXT-X-ENDLIST\n",
        );
        let app = spawn_app!(store);

        let req = test::TestRequest::get().uri("/streams/all").to_request();
        let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(body.contains("#EXT-X-MEDIA-SEQUENCE:0"));
        assert_eq!(body.matches("X-Amz-Signature").count(), 2);
    }

    #[actix_web::test]
    async fn test_storage_failure_is_500_with_error_body() {
        let mut store = InMemoryStore::new(1);
        store.insert("streams/a_640x360_500k.m3u8", "#EXTM3U");
        store.insert("streams/b_1280x720_2000k.m3u8", "#EXTM3U");
        store.fail_after_pages(1);
        let app = spawn_app!(store);

        let req = test::TestRequest::get().uri("/streams/master").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Storage error"));
    }
}
