use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::SearchResponse,
    routes::AppState,
};

const DEFAULT_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// Handler for song search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        limit = params.limit,
        "Searching songs"
    );

    let songs = state
        .catalog
        .search_songs(&params.q, params.limit)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Search error");
            e.context("Search failed")
        })?;

    Ok(Json(SearchResponse::new(params.q, songs)))
}
