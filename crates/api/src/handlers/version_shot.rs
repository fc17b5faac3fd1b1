//! Handlers for the `/versionshots` resource.
//!
//! Submissions auto-assign the next version number per `(shot_id, task_id)`
//! pair; updates run through the revision guard (open / locked / committed).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use shotvault_core::error::CoreError;
use shotvault_core::types::DbId;
use shotvault_db::models::version_shot::{CreateVersionShot, UpdateVersionShot};
use shotvault_db::repositories::{CreateOutcome, UpdateOutcome, VersionShotRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /versionshots/create`.
///
/// Identifier fields are optional at the serde level so missing values
/// surface as this service's 400 envelope rather than a deserialize
/// rejection.
#[derive(Debug, Deserialize)]
pub struct CreateVersionShotRequest {
    pub shot_id: Option<String>,
    pub task_id: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub version_number: Option<i32>,
    pub master_shot_id: Option<DbId>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Request body for `PATCH /versionshots/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateVersionShotRequest {
    pub edit_user_id: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub master_shot_id: Option<DbId>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub locked: Option<bool>,
    pub locked_by_user_id: Option<String>,
    pub locked_by_user_name: Option<String>,
    pub commited: Option<bool>,
}

/// Reject `None` and whitespace-only values for a required field.
fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Core(CoreError::Validation(message.into()))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/versionshots/create
///
/// Submit a new version shot. The version number is auto-assigned per
/// `(shot_id, task_id)` unless the caller supplies one. A file that was
/// already submitted anywhere is rejected with 409.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateVersionShotRequest>,
) -> AppResult<impl IntoResponse> {
    let shot_id = required(input.shot_id, "Both shot_id and task_id are required")?;
    let task_id = required(input.task_id, "Both shot_id and task_id are required")?;
    let file_path = required(input.file_path, "file_path and file_name are required")?;
    let file_name = required(input.file_name, "file_path and file_name are required")?;
    if input.version_number.is_some_and(|n| n < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "version_number must be a non-negative integer".into(),
        )));
    }

    let submission = CreateVersionShot {
        shot_id,
        task_id,
        file_path,
        file_name,
        version_number: input.version_number,
        master_shot_id: input.master_shot_id,
        description: input.description,
        metadata: input.metadata,
    };

    match VersionShotRepo::create(&state.pool, &submission).await? {
        CreateOutcome::Created(created) => {
            let message = format!(
                "Version {} for shot '{}' and task '{}' created successfully!",
                created.version.version_number, created.version.shot_id, created.version.task_id
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::ok(message, *created)),
            ))
        }
        CreateOutcome::DuplicateFile => Err(AppError::Core(CoreError::Conflict(
            "VersionShot with the same file_name and file_path already exists.".into(),
        ))),
        CreateOutcome::VersionTaken => Err(AppError::Core(CoreError::Conflict(format!(
            "Version {} already exists for shot '{}' and task '{}'.",
            submission.version_number.unwrap_or_default(),
            submission.shot_id,
            submission.task_id
        )))),
    }
}

/// GET /api/v1/versionshots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let version = VersionShotRepo::find_by_id_with_master(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "Version shot with ID '{id}' not found."
            )))
        })?;
    Ok(Json(ApiResponse::ok(
        "Version shot retrieved successfully!",
        version,
    )))
}

/// PATCH /api/v1/versionshots/{id}
///
/// Apply a partial update through the revision guard: a committed record is
/// never editable (409); a locked record is editable only by the lock holder
/// (403 otherwise). Returns 202 on success.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVersionShotRequest>,
) -> AppResult<impl IntoResponse> {
    let edit_user_id = required(input.edit_user_id, "edit_user_id is required")?;

    let mut changes = UpdateVersionShot {
        file_path: input.file_path,
        file_name: input.file_name,
        master_shot_id: input.master_shot_id,
        description: input.description,
        metadata: input.metadata,
        locked: input.locked,
        locked_by_user_id: input.locked_by_user_id,
        locked_by_user_name: input.locked_by_user_name,
        commited: input.commited,
    };

    // Taking a lock without naming a holder locks it to the editor.
    if changes.locked == Some(true) && changes.locked_by_user_id.is_none() {
        changes.locked_by_user_id = Some(edit_user_id.clone());
    }

    match VersionShotRepo::update(&state.pool, id, &edit_user_id, &changes).await? {
        UpdateOutcome::Updated(updated) => Ok((
            StatusCode::ACCEPTED,
            Json(ApiResponse::ok(
                "Version shot updated successfully!",
                *updated,
            )),
        )),
        UpdateOutcome::NotFound => Err(AppError::Core(CoreError::NotFound(format!(
            "Version shot with ID '{id}' not found."
        )))),
        UpdateOutcome::Denied(denied) => Err(AppError::Core(denied.into())),
    }
}

/// GET /api/v1/versionshots/list
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let versions = VersionShotRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::ok(
        "Version shots retrieved successfully!",
        versions,
    )))
}

/// GET /api/v1/versionshots/list/{shot_id}
pub async fn list_by_shot(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(shot_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let versions = VersionShotRepo::list_by_shot(&state.pool, &shot_id).await?;
    Ok(Json(ApiResponse::ok(
        "Version shots retrieved successfully!",
        versions,
    )))
}

/// GET /api/v1/versionshots/list/{shot_id}/tasks/{task_id}
///
/// All versions for the pair, latest on top.
pub async fn list_by_shot_task(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((shot_id, task_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let versions = VersionShotRepo::list_by_shot_task(&state.pool, &shot_id, &task_id).await?;
    Ok(Json(ApiResponse::ok(
        "Version shots retrieved successfully!",
        versions,
    )))
}

/// GET /api/v1/versionshots/list/{shot_id}/tasks/{task_id}/versions
///
/// The latest version for the pair; 404 when none exist.
pub async fn latest_by_shot_task(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((shot_id, task_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let version = VersionShotRepo::find_latest(&state.pool, &shot_id, &task_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "No versions found for shot_id '{shot_id}' and task_id '{task_id}'."
            )))
        })?;
    Ok(Json(ApiResponse::ok(
        "Latest version shot retrieved successfully!",
        version,
    )))
}

/// GET /api/v1/versionshots/list/{shot_id}/tasks/{task_id}/versions/{version_number}
pub async fn get_by_version_number(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((shot_id, task_id, version_number)): Path<(String, String, i32)>,
) -> AppResult<impl IntoResponse> {
    let version =
        VersionShotRepo::find_by_version_number(&state.pool, &shot_id, &task_id, version_number)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound(format!(
                    "Version {version_number} for shot_id '{shot_id}' and task_id '{task_id}' not found."
                )))
            })?;
    Ok(Json(ApiResponse::ok(
        format!("Version {version_number} retrieved successfully!"),
        version,
    )))
}

/// DELETE /api/v1/versionshots/delete/{shot_id}/tasks/{task_id}/versions/{version_number}
///
/// Removes exactly that version; 404 when absent.
pub async fn delete_by_version_number(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((shot_id, task_id, version_number)): Path<(String, String, i32)>,
) -> AppResult<StatusCode> {
    let deleted =
        VersionShotRepo::delete_by_version_number(&state.pool, &shot_id, &task_id, version_number)
            .await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound(format!(
            "Version {version_number} for shot_id '{shot_id}' and task_id '{task_id}' not found."
        ))));
    }
    Ok(StatusCode::NO_CONTENT)
}
