use serde::Serialize;

use super::catalog::{best_thumbnail, CatalogSong, SongPayload};

/// A song as returned by `/search`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub duration: Option<String>,
    pub thumbnail: Option<String>,
}

impl From<CatalogSong> for SearchResultItem {
    fn from(song: CatalogSong) -> Self {
        Self {
            thumbnail: best_thumbnail(&song.thumbnails),
            video_id: song.video_id,
            title: song.title,
            artists: song.artists.into_iter().map(|a| a.name).collect(),
            album: song.album.map(|a| a.name),
            duration: song.duration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchResultItem>,
}

impl SearchResponse {
    pub fn new(query: String, songs: Vec<CatalogSong>) -> Self {
        let results: Vec<SearchResultItem> =
            songs.into_iter().map(SearchResultItem::from).collect();
        Self {
            query,
            count: results.len(),
            results,
        }
    }
}

/// A song as returned by `/song/{video_id}`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SongDetails {
    pub video_id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Seconds
    pub duration: Option<u64>,
    pub thumbnail: Option<String>,
    pub view_count: Option<u64>,
}

impl SongDetails {
    /// Projects the player payload; every missing nested field becomes `None`.
    pub fn from_payload(video_id: String, payload: SongPayload) -> Self {
        let details = payload.video_details.unwrap_or_default();

        Self {
            video_id,
            title: details.title,
            artist: details.author,
            duration: details.length_seconds,
            thumbnail: details
                .thumbnail
                .and_then(|list| best_thumbnail(&list.thumbnails)),
            view_count: details.view_count,
        }
    }
}
