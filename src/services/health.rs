use serde::Serialize;

use crate::services::catalog::CatalogClient;

/// Outcome of the live health probe. Serialized untagged so the two shapes
/// read `{status: "healthy", ...}` and `{status: "unhealthy", error}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HealthReport {
    Healthy {
        status: &'static str,
        ytmusicapi: &'static str,
        #[serde(rename = "yt-dlp")]
        yt_dlp: &'static str,
    },
    Unhealthy {
        status: &'static str,
        error: String,
    },
}

impl HealthReport {
    pub fn healthy() -> Self {
        HealthReport::Healthy {
            status: "healthy",
            ytmusicapi: "ok",
            yt_dlp: "ok",
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        HealthReport::Unhealthy {
            status: "unhealthy",
            error: error.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthReport::Healthy { .. })
    }
}

/// Runs a one-result search. Never fails: errors become an unhealthy report.
pub async fn check(catalog: &dyn CatalogClient) -> HealthReport {
    match catalog.search_songs("test", 1).await {
        Ok(_) => HealthReport::healthy(),
        Err(e) => {
            tracing::warn!(error = %e, catalog = catalog.name(), "Health probe failed");
            HealthReport::unhealthy(e.to_string())
        }
    }
}
