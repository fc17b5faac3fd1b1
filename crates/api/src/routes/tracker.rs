//! Route definitions for production-tracker info.

use axum::routing::get;
use axum::Router;

use crate::handlers::tracker;
use crate::state::AppState;

/// Routes mounted at `/tracker`.
///
/// ```text
/// GET /api -> info
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/api", get(tracker::info))
}
