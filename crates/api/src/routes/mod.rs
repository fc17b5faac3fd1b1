pub mod auth;
pub mod health;
pub mod master_shot;
pub mod nas_server;
pub mod tracker;
pub mod version_shot;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                              login proxy (public)
///
/// /versionshots/create                                     submit (POST)
/// /versionshots/list                                       all versions
/// /versionshots/list/{shot_id}                             by shot
/// /versionshots/list/{shot_id}/tasks/{task_id}             by shot+task, latest first
/// /versionshots/list/{shot_id}/tasks/{task_id}/versions    latest version
/// /versionshots/list/{shot_id}/tasks/{task_id}/versions/{n}  exact version
/// /versionshots/delete/{shot_id}/tasks/{task_id}/versions/{n} delete exact (DELETE)
/// /versionshots/{id}                                       get, update (GET, PATCH)
///
/// /mastershots/create                                      create (POST)
/// /mastershots/list                                        list
/// /mastershots/{id}                                        get, update, delete
///
/// /nas/list                                                list with master shots
/// /nas/create                                              register (POST)
/// /nas/{id}                                                get, update, delete
///
/// /tracker/api                                             tracker configuration info
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication proxy (login).
        .nest("/auth", auth::router())
        // Versioned shot submissions.
        .nest("/versionshots", version_shot::router())
        // Canonical master shot records.
        .nest("/mastershots", master_shot::router())
        // NAS storage registry.
        .nest("/nas", nas_server::router())
        // Production-tracker configuration info.
        .nest("/tracker", tracker::router())
}
