//! Route definitions for NAS server registrations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::nas_server;
use crate::state::AppState;

/// Routes mounted at `/nas`.
///
/// ```text
/// GET    /list   -> list (each entry embeds its master shots)
/// POST   /create -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(nas_server::list))
        .route("/create", post(nas_server::create))
        .route(
            "/{id}",
            get(nas_server::get_by_id)
                .patch(nas_server::update)
                .delete(nas_server::delete),
        )
}
