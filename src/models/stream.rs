use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use super::media::{EncodingCandidate, MediaInfo};

pub const EXPIRY_NOTE: &str = "Stream URL expires in ~6 hours";

/// Direct-URL answer of `/stream/{video_id}`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamDescriptor {
    pub video_id: String,
    pub url: String,
    pub title: Option<String>,
    pub duration: Option<f64>,
    pub thumbnail: Option<String>,
    pub format: Option<String>,
    pub bitrate: Option<f64>,
    pub filesize: Option<u64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub note: &'static str,
}

impl StreamDescriptor {
    pub fn new(
        video_id: String,
        url: String,
        info: &MediaInfo,
        encoding: &EncodingCandidate,
    ) -> Self {
        Self {
            expires_at: url_expiry(&url),
            video_id,
            url,
            title: info.title.clone(),
            duration: info.duration,
            thumbnail: info.thumbnail.clone(),
            format: encoding.ext.clone(),
            bitrate: encoding.abr,
            filesize: encoding.filesize.or(encoding.filesize_approx),
            note: EXPIRY_NOTE,
        }
    }
}

/// Reads the unix `expire` parameter googlevideo URLs carry.
pub fn url_expiry(url: &str) -> Option<DateTime<Utc>> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let (_, value) = parsed.query_pairs().find(|(key, _)| key == "expire")?;
    let seconds: i64 = value.parse().ok()?;
    Utc.timestamp_opt(seconds, 0).single()
}
