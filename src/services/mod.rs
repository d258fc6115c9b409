/// Business logic services
///
/// - Storage: object store access (listing, fetching, presigning)
/// - Playlist: HLS playlist synthesis and rewriting
pub mod playlist;
pub mod storage;
