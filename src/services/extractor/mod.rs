//! Media extraction abstraction
//!
//! An extractor turns a watch page URL into the list of encodings the content
//! delivery network currently offers for it, each with a time-limited direct URL.

use crate::{error::AppResult, models::MediaInfo};

pub mod ytdlp;

pub use ytdlp::YtDlp;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Resolve the candidate encodings for a watch URL
    async fn extract(&self, watch_url: &str) -> AppResult<MediaInfo>;

    /// Extractor name for logging
    fn name(&self) -> &'static str;
}

/// Canonical watch page for a catalog video id
pub fn watch_url(base_url: &str, video_id: &str) -> String {
    format!("{}/watch?v={}", base_url.trim_end_matches('/'), video_id)
}
