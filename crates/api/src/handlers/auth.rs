//! Handlers for the `/auth` resource.
//!
//! Login is a proxy: credentials go to the production tracker, and its token
//! payload is returned verbatim so tracker clients keep working, with the
//! refresh token additionally mirrored into an HttpOnly cookie.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use shotvault_core::error::CoreError;

use crate::auth::identity::IdentityError;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Base URL of the tracker to authenticate against. Falls back to the
    /// configured `TRACKER_URL`.
    pub tracker_url: Option<String>,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let email = input
        .email
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("email is required".into())))?;
    let password = input
        .password
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("password is required".into())))?;
    let tracker_url = input
        .tracker_url
        .filter(|v| !v.trim().is_empty())
        .or_else(|| state.config.tracker_url.clone())
        .ok_or_else(|| {
            AppError::BadRequest("A tracker URL is required for authentication validation".into())
        })?;

    let body = state
        .identity
        .login(&tracker_url, &email, &password)
        .await
        .map_err(|err| match err {
            IdentityError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Identity service unreachable during login");
                AppError::Upstream("Authentication service unavailable".into())
            }
            other => AppError::Core(CoreError::Unauthorized(other.to_string())),
        })?;

    let refresh_token = body
        .get("refresh_token")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();
    let cookie = state.config.cookie.build_refresh_cookie(&refresh_token);
    let cookie_value = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid cookie value: {e}")))?;

    let mut response = (StatusCode::OK, Json(body)).into_response();
    response.headers_mut().append(SET_COOKIE, cookie_value);
    Ok(response)
}
