/// HTTP handlers for the VOD gateway
///
/// - Files: flat bucket catalog and direct presigned download links
/// - Streams: HLS playlist discovery, synthesis, and rewriting
pub mod files;
pub mod streams;

pub use files::{list_files, presigned_url};
pub use streams::{continuous_playlist, list_streams, master_playlist, variant_playlist};
