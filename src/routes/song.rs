use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::SongDetails,
    routes::AppState,
};

/// Handler for song details endpoint
pub async fn song_details(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(video_id): Path<String>,
) -> AppResult<Json<SongDetails>> {
    tracing::info!(request_id = %request_id, video_id = %video_id, "Getting song details");

    let payload = state.catalog.get_song(&video_id).await.map_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "Song details error");
        e.context("Failed to get song details")
    })?;

    Ok(Json(SongDetails::from_payload(video_id, payload)))
}
