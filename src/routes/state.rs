use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::{Config, StreamMode},
    error::AppResult,
    services::{CatalogClient, MediaExtractor, Relay, YtDlp, YtMusicClient},
};

/// Shared application state
///
/// Built once at startup and never mutated; handlers receive it through
/// `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogClient>,
    pub extractor: Arc<dyn MediaExtractor>,
    pub relay: Relay,
    pub stream_mode: StreamMode,
    /// Base of the canonical watch URLs handed to the extractor
    pub watch_base_url: String,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        extractor: Arc<dyn MediaExtractor>,
        relay: Relay,
        stream_mode: StreamMode,
        watch_base_url: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            extractor,
            relay,
            stream_mode,
            watch_base_url: watch_base_url.into(),
        }
    }

    /// Wires the production collaborators from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let upstream_timeout = Duration::from_secs(config.upstream_timeout_secs);

        let catalog = YtMusicClient::new(
            &config.catalog_base_url,
            &config.catalog_language,
            &config.user_agent,
            upstream_timeout,
        )?;
        let extractor = YtDlp::new(
            config.ytdlp_path.clone(),
            Duration::from_secs(config.extractor_timeout_secs),
        );
        let relay = Relay::new(&config.user_agent, upstream_timeout)?;

        tracing::info!(
            catalog = catalog.name(),
            extractor = extractor.name(),
            stream_mode = ?config.stream_mode,
            "Application state initialized"
        );

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(extractor),
            relay,
            config.stream_mode,
            config.catalog_base_url.clone(),
        ))
    }
}
