use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    routes::AppState,
    services::health::{self, HealthReport},
};

/// Static service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "running",
        "service": "YouTube Music API",
        "endpoints": ["/search", "/stream/{video_id}", "/song/{video_id}"]
    }))
}

/// Live check against the catalog; always answers 200
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(health::check(state.catalog.as_ref()).await)
}
