/// VOD Gateway - HTTP Server
///
/// Serves the file catalog and HLS playlist endpoints on top of a private
/// object-storage bucket. The bucket is read-only from this process's
/// perspective and no state is held beyond the bucket itself.
use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware as actix_middleware, web, App, HttpResponse, HttpServer};
use vod_service::handlers;
use vod_service::services::storage::s3::{get_s3_client, S3ObjectStore};
use vod_service::services::storage::ObjectStore;
use vod_service::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from environment; missing credentials are fatal
    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("configuration error: {e}")))?;

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!(
        bucket = %config.s3.bucket,
        endpoint = %config.s3.endpoint,
        "VOD gateway starting on {}",
        bind_address
    );

    // Build the S3 client once; shared read-only for the process lifetime
    let client = get_s3_client(&config.s3).await;
    let store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(client, config.s3.bucket.clone()));

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .allowed_header(actix_web::http::header::CONTENT_TYPE);

        App::new()
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::new(config.clone()))
            .wrap(cors)
            .wrap(actix_middleware::Logger::default())
            .route(
                "/health",
                web::get()
                    .to(|| async { HttpResponse::Ok().json(serde_json::json!({"status": "ok"})) }),
            )
            .route("/files", web::get().to(handlers::list_files))
            .route(
                "/presigned-url/{file_name:.*}",
                web::get().to(handlers::presigned_url),
            )
            .route("/streams", web::get().to(handlers::list_streams))
            // fixed paths must be registered before the catch-all variant route
            .route("/streams/master", web::get().to(handlers::master_playlist))
            .route("/streams/all", web::get().to(handlers::continuous_playlist))
            .route(
                "/streams/{file_name:.*}",
                web::get().to(handlers::variant_playlist),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
