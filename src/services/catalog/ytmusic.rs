//! YouTube Music catalog client
//!
//! Speaks the InnerTube JSON API that music.youtube.com itself uses, posing as
//! the `WEB_REMIX` web client. No credentials are needed for search and player
//! lookups.
//!
//! API Flow:
//! 1. Search: /youtubei/v1/search with the songs filter → music shelf rows
//! 2. Continuations: same endpoint with `ctoken` until `limit` rows are collected
//! 3. Details: /youtubei/v1/player → `videoDetails`

use crate::{
    error::{AppError, AppResult},
    models::{thumbnails_from_value, AlbumRef, ArtistRef, CatalogSong, SongPayload},
    services::catalog::CatalogClient,
};
use chrono::Utc;
use reqwest::{header, Client as HttpClient};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::instrument;

/// Search params selecting the "Songs" filter
const SONGS_FILTER_PARAMS: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";
const CLIENT_NAME: &str = "WEB_REMIX";

const SEARCH_SECTIONS: &str =
    "/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents";
const TITLE_TEXT: &str =
    "/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/text";
const DETAIL_RUNS: &str =
    "/flexColumns/1/musicResponsiveListItemFlexColumnRenderer/text/runs";
const OVERLAY_VIDEO_ID: &str = concat!(
    "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer",
    "/playNavigationEndpoint/watchEndpoint/videoId"
);
const THUMBNAILS: &str = "/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails";

#[derive(Clone)]
pub struct YtMusicClient {
    http_client: HttpClient,
    base_url: String,
    language: String,
}

impl YtMusicClient {
    pub fn new(
        base_url: &str,
        language: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    fn context(&self) -> Value {
        json!({
            "client": {
                "clientName": CLIENT_NAME,
                "clientVersion": client_version(),
                "hl": self.language,
            },
            "user": {}
        })
    }

    async fn post(
        &self,
        endpoint: &str,
        mut body: Value,
        extra_query: &[(&str, &str)],
    ) -> AppResult<Value> {
        let url = format!("{}/youtubei/v1/{}", self.base_url, endpoint);
        body["context"] = self.context();

        let response = self
            .http_client
            .post(&url)
            .query(&[("alt", "json")])
            .query(extra_query)
            .header(header::ORIGIN, self.base_url.as_str())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!(
                "YouTube Music returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogClient for YtMusicClient {
    #[instrument(skip(self))]
    async fn search_songs(&self, query: &str, limit: usize) -> AppResult<Vec<CatalogSong>> {
        let body = json!({ "query": query, "params": SONGS_FILTER_PARAMS });
        let response = self.post("search", body.clone(), &[]).await?;

        let Some(shelf) = search_shelf(&response) else {
            tracing::info!(query = %query, "Search returned no song shelf");
            return Ok(Vec::new());
        };

        let mut songs = parse_shelf_items(shelf);
        let mut continuation = next_continuation(shelf);

        while songs.len() < limit {
            let Some(token) = continuation.take() else {
                break;
            };

            let page = self
                .post(
                    "search",
                    body.clone(),
                    &[
                        ("ctoken", token.as_str()),
                        ("continuation", token.as_str()),
                        ("type", "next"),
                    ],
                )
                .await?;

            let Some(shelf) = page.pointer("/continuationContents/musicShelfContinuation") else {
                break;
            };

            let items = parse_shelf_items(shelf);
            if items.is_empty() {
                break;
            }
            songs.extend(items);
            continuation = next_continuation(shelf);
        }

        songs.truncate(limit);

        tracing::info!(
            query = %query,
            results = songs.len(),
            catalog = self.name(),
            "Song search completed"
        );

        Ok(songs)
    }

    #[instrument(skip(self))]
    async fn get_song(&self, video_id: &str) -> AppResult<SongPayload> {
        let body = json!({
            "videoId": video_id,
            "playbackContext": {
                "contentPlaybackContext": { "html5Preference": "HTML5_PREF_WANTS" }
            }
        });

        let response = self.post("player", body, &[]).await?;
        let payload: SongPayload = serde_json::from_value(response).map_err(|e| {
            AppError::Catalog(format!("Failed to parse player response: {}", e))
        })?;

        if payload.video_details.is_none() {
            let reason = payload
                .playability_status
                .as_ref()
                .and_then(|s| s.reason.as_deref())
                .unwrap_or("unknown");
            tracing::warn!(
                video_id = %video_id,
                reason = %reason,
                "Player response without videoDetails"
            );
        }

        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "ytmusic"
    }
}

/// InnerTube rejects stale client versions, so track today's date.
fn client_version() -> String {
    format!("1.{}.01.00", Utc::now().format("%Y%m%d"))
}

fn search_shelf(response: &Value) -> Option<&Value> {
    response
        .pointer(SEARCH_SECTIONS)
        .or_else(|| response.pointer("/contents/sectionListRenderer/contents"))?
        .as_array()?
        .iter()
        .find_map(|section| section.get("musicShelfRenderer"))
}

fn next_continuation(shelf: &Value) -> Option<String> {
    shelf
        .pointer("/continuations/0/nextContinuationData/continuation")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_shelf_items(shelf: &Value) -> Vec<CatalogSong> {
    shelf
        .get("contents")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("musicResponsiveListItemRenderer"))
                .filter_map(parse_song_renderer)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_song_renderer(renderer: &Value) -> Option<CatalogSong> {
    renderer.get("flexColumns")?;

    let text = |pointer: &str| {
        renderer
            .pointer(pointer)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let runs = renderer
        .pointer(DETAIL_RUNS)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let details = parse_song_runs(runs);

    let thumbnails = renderer
        .pointer(THUMBNAILS)
        .map(thumbnails_from_value)
        .unwrap_or_default();

    Some(CatalogSong {
        video_id: text("/playlistItemData/videoId").or_else(|| text(OVERLAY_VIDEO_ID)),
        title: text(TITLE_TEXT),
        artists: details.artists,
        album: details.album,
        duration: details.duration,
        thumbnails,
    })
}

#[derive(Debug, Default)]
struct SongRuns {
    artists: Vec<ArtistRef>,
    album: Option<AlbumRef>,
    duration: Option<String>,
}

/// Splits the "Artist • Album • 3:45" column into its parts.
///
/// Odd runs are the " • " separators. Linked runs are artists or the album
/// (album browse ids start with MPRE); plain runs are classified by shape and
/// play counts are skipped.
fn parse_song_runs(runs: &[Value]) -> SongRuns {
    let mut parsed = SongRuns::default();

    for run in runs.iter().step_by(2) {
        let Some(text) = run.get("text").and_then(Value::as_str) else {
            continue;
        };

        let browse_id = run
            .pointer("/navigationEndpoint/browseEndpoint/browseId")
            .and_then(Value::as_str);

        match browse_id {
            Some(id) if id.starts_with("MPRE") || id.contains("release_detail") => {
                parsed.album = Some(AlbumRef {
                    name: text.to_string(),
                    id: Some(id.to_string()),
                });
            }
            Some(id) => parsed.artists.push(ArtistRef {
                name: text.to_string(),
                id: Some(id.to_string()),
            }),
            None if is_duration(text) => parsed.duration = Some(text.to_string()),
            None if is_view_count(text) => {}
            None => parsed.artists.push(ArtistRef {
                name: text.to_string(),
                id: None,
            }),
        }
    }

    parsed
}

fn is_duration(text: &str) -> bool {
    let parts: Vec<&str> = text.split(':').collect();
    parts.len() >= 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

fn is_view_count(text: &str) -> bool {
    text.ends_with(" views") || text.ends_with(" plays")
}
