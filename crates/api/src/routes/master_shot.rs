//! Route definitions for master shots.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::master_shot;
use crate::state::AppState;

/// Routes mounted at `/mastershots`.
///
/// ```text
/// POST   /create -> create
/// GET    /list   -> list
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(master_shot::create))
        .route("/list", get(master_shot::list))
        .route(
            "/{id}",
            get(master_shot::get_by_id)
                .patch(master_shot::update)
                .delete(master_shot::delete),
        )
}
