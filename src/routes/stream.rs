use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    config::StreamMode,
    error::AppResult,
    middleware::RequestId,
    models::StreamDescriptor,
    routes::AppState,
    services::{extractor::watch_url, selection::resolve_audio},
};

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Accepted for compatibility; selection always takes the best audio
    #[serde(default)]
    format: Option<String>,
}

/// Handler for audio stream endpoint
///
/// Depending on the configured [`StreamMode`] this either returns the resolved
/// media URL or relays the audio bytes. Once relaying starts the status line is
/// committed, so an upstream failure mid-stream only truncates the body.
pub async fn stream_audio(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(video_id): Path<String>,
    Query(params): Query<StreamQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    tracing::info!(
        request_id = %request_id,
        video_id = %video_id,
        format = ?params.format,
        mode = ?state.stream_mode,
        "Resolving audio stream"
    );

    let url = watch_url(&state.watch_base_url, &video_id);
    let resolved = resolve_audio(state.extractor.as_ref(), &url)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Stream extraction error");
            e.context("Failed to extract stream")
        })?;

    match state.stream_mode {
        StreamMode::Direct => {
            let descriptor =
                StreamDescriptor::new(video_id, resolved.url, &resolved.info, &resolved.encoding);
            Ok(Json(descriptor).into_response())
        }
        StreamMode::Proxy => state.relay.open(&resolved.url, &headers).await.map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Relay error");
            e.context("Failed to extract stream")
        }),
    }
}
