//! Music catalog abstraction
//!
//! The catalog answers text searches with ranked songs and resolves a video id to
//! its detailed metadata. Handlers only see this trait; the production client
//! talks to YouTube Music's InnerTube API.

use crate::{
    error::AppResult,
    models::{CatalogSong, SongPayload},
};

pub mod ytmusic;

pub use ytmusic::YtMusicClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search the catalog restricted to songs
    ///
    /// Returns at most `limit` songs in the catalog's ranking order.
    async fn search_songs(&self, query: &str, limit: usize) -> AppResult<Vec<CatalogSong>>;

    /// Fetch the raw player payload for a single video
    async fn get_song(&self, video_id: &str) -> AppResult<SongPayload>;

    /// Client name for logging
    fn name(&self) -> &'static str;
}
