//! Handlers for the `/nas` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shotvault_core::error::CoreError;
use shotvault_core::types::DbId;
use shotvault_db::models::nas_server::{CreateNasServer, UpdateNasServer};
use shotvault_db::repositories::NasServerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/nas/list
///
/// All NAS registrations, each with the master shots stored on it.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let entries = NasServerRepo::list_with_shots(&state.pool).await?;
    Ok(Json(ApiResponse::ok(
        "NAS entries retrieved successfully!",
        entries,
    )))
}

/// POST /api/v1/nas/create
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateNasServer>,
) -> AppResult<impl IntoResponse> {
    let entry = NasServerRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("NAS entry created successfully!", entry)),
    ))
}

/// GET /api/v1/nas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = NasServerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "NAS entry with ID '{id}' not found."
            )))
        })?;
    Ok(Json(ApiResponse::ok(
        "NAS entry retrieved successfully!",
        entry,
    )))
}

/// PATCH /api/v1/nas/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNasServer>,
) -> AppResult<impl IntoResponse> {
    let entry = NasServerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(format!(
                "NAS entry with ID '{id}' not found."
            )))
        })?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::ok("NAS entry updated successfully!", entry)),
    ))
}

/// DELETE /api/v1/nas/{id}
///
/// Master shots referencing this server are unlinked, not deleted.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = NasServerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound(format!(
            "NAS entry with ID '{id}' not found."
        ))));
    }
    Ok(StatusCode::NO_CONTENT)
}
