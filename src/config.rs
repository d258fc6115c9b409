/// Configuration management for vod-service
///
/// Loads configuration from environment variables. Storage credentials are
/// required and validated at startup; everything else has sensible defaults.
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub s3: S3Config,
    pub media: MediaConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct S3Config {
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MediaConfig {
    /// Key prefix under which HLS variant playlists live
    pub stream_prefix: String,
    /// Extension used by the flat file catalog endpoint
    pub catalog_extension: String,
    /// Extension identifying variant playlists
    pub manifest_extension: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing storage credentials are a fatal startup error, not a
    /// per-request error.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                host: std::env::var("VOD_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("VOD_SERVICE_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .map_err(|e| format!("VOD_SERVICE_PORT is not a valid port: {e}"))?,
            },
            s3: S3Config {
                endpoint: require_env("S3_ENDPOINT")?,
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
                bucket: require_env("S3_BUCKET")?,
                region: std::env::var("AWS_REGION")
                    .unwrap_or_else(|_| "ap-southeast-1".to_string()),
            },
            media: MediaConfig {
                stream_prefix: std::env::var("STREAM_PREFIX")
                    .unwrap_or_else(|_| "streams/".to_string()),
                catalog_extension: std::env::var("CATALOG_EXTENSION")
                    .unwrap_or_else(|_| ".mp4".to_string()),
                manifest_extension: std::env::var("MANIFEST_EXTENSION")
                    .unwrap_or_else(|_| ".m3u8".to_string()),
            },
        })
    }
}

fn require_env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("required environment variable {name} is not set").into())
}
