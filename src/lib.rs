//! VOD Gateway Service
//!
//! Virtualizes adaptive-bitrate HLS playback and flat file listing on top
//! of a private S3-compatible bucket. Playlists are reconstructed or
//! rewritten per request and every media segment reference is replaced
//! with a short-lived presigned URL; no media is re-encoded or re-stored.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
