//! Route definitions for version shots.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::version_shot;
use crate::state::AppState;

/// Routes mounted at `/versionshots`.
///
/// ```text
/// POST   /create                                        -> create
/// GET    /list                                          -> list
/// GET    /list/{shot_id}                                -> list_by_shot
/// GET    /list/{shot_id}/tasks/{task_id}                -> list_by_shot_task
/// GET    /list/{shot_id}/tasks/{task_id}/versions       -> latest_by_shot_task
/// GET    /list/{shot_id}/tasks/{task_id}/versions/{n}   -> get_by_version_number
/// DELETE /delete/{shot_id}/tasks/{task_id}/versions/{n} -> delete_by_version_number
/// GET    /{id}                                          -> get_by_id
/// PATCH  /{id}                                          -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(version_shot::create))
        .route("/list", get(version_shot::list))
        .route("/list/{shot_id}", get(version_shot::list_by_shot))
        .route(
            "/list/{shot_id}/tasks/{task_id}",
            get(version_shot::list_by_shot_task),
        )
        .route(
            "/list/{shot_id}/tasks/{task_id}/versions",
            get(version_shot::latest_by_shot_task),
        )
        .route(
            "/list/{shot_id}/tasks/{task_id}/versions/{version_number}",
            get(version_shot::get_by_version_number),
        )
        .route(
            "/delete/{shot_id}/tasks/{task_id}/versions/{version_number}",
            delete(version_shot::delete_by_version_number),
        )
        .route(
            "/{id}",
            get(version_shot::get_by_id).patch(version_shot::update),
        )
}
