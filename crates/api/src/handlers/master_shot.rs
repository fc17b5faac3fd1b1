//! Handlers for the `/mastershots` resource.
//!
//! Master shots are the canonical top-level records for a shot, keyed by
//! `(file_name, file_path)`. Natural-key duplicates surface as 409 via the
//! store constraint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shotvault_core::error::CoreError;
use shotvault_core::types::DbId;
use shotvault_db::models::master_shot::{CreateMasterShot, UpdateMasterShot};
use shotvault_db::repositories::MasterShotRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/mastershots/create
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateMasterShot>,
) -> AppResult<impl IntoResponse> {
    let master = MasterShotRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Master shot created successfully!", master)),
    ))
}

/// GET /api/v1/mastershots/list
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let masters = MasterShotRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::ok(
        "Master shots retrieved successfully!",
        masters,
    )))
}

/// GET /api/v1/mastershots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let master = MasterShotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "Master shot with ID '{id}' not found."
            )))
        })?;
    Ok(Json(ApiResponse::ok(
        "Master shot retrieved successfully!",
        master,
    )))
}

/// PATCH /api/v1/mastershots/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMasterShot>,
) -> AppResult<impl IntoResponse> {
    let master = MasterShotRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "Master shot with ID '{id}' not found."
            )))
        })?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::ok("Master shot updated successfully!", master)),
    ))
}

/// DELETE /api/v1/mastershots/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MasterShotRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound(format!(
            "Master shot with ID '{id}' not found."
        ))));
    }
    Ok(StatusCode::NO_CONTENT)
}
