//! Handlers for the `/tracker` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// GET /api/v1/tracker/api
///
/// Reports whether a default production-tracker URL is configured.
pub async fn info(State(state): State<AppState>) -> impl IntoResponse {
    match &state.config.tracker_url {
        Some(url) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Production tracker is configured!",
                "url": url,
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "message": "Production tracker URL is not configured in settings.",
            })),
        ),
    }
}
