//! Request guard that validates bearer tokens against the production tracker.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shotvault_core::error::CoreError;

use crate::auth::identity::IdentityError;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the tracker base URL when the caller targets a tracker
/// other than the configured default.
const TRACKER_URL_HEADER: &str = "x-tracker-url";

/// Authenticated user, validated per request against the identity service.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(_user: AuthUser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's identifier at the tracker, when the tracker reports one.
    pub id: Option<String>,
    /// The user's display name, when the tracker reports one.
    pub full_name: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let tracker_url = parts
            .headers
            .get(TRACKER_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| state.config.tracker_url.clone())
            .ok_or_else(|| {
                AppError::BadRequest(
                    "A tracker URL is required for authentication validation".into(),
                )
            })?;

        let user = state
            .identity
            .authenticated_user(&tracker_url, token)
            .await
            .map_err(|err| match err {
                IdentityError::Unavailable(msg) => {
                    tracing::error!(error = %msg, "Identity service unreachable during token validation");
                    AppError::Upstream("Authentication service unavailable".into())
                }
                _ => AppError::Core(CoreError::Unauthorized(
                    "Could not validate credentials".into(),
                )),
            })?;

        Ok(AuthUser {
            id: user.id,
            full_name: user.full_name,
        })
    }
}
