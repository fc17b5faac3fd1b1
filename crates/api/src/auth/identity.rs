//! HTTP client for the production-tracker identity service.
//!
//! All authentication is delegated: credentials are verified by
//! `POST {base}/auth/login` and bearer tokens by
//! `GET {base}/auth/authenticated`. This service never issues or inspects
//! tokens itself.

use std::time::Duration;

use axum::http::StatusCode;
use serde::Deserialize;

/// How long to wait for the identity service before reporting it unavailable.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of an identity-service call, before HTTP mapping.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Login failed. Please check your credentials.")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Identity service unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected identity service response: {0}")]
    Malformed(String),
}

/// Profile fields the tracker reports for an authenticated user.
///
/// The tracker payload is larger; only the fields this service reads are
/// deserialized, leniently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackerUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthenticatedResponse {
    #[serde(default)]
    user: Option<TrackerUser>,
}

/// Reusable client for the identity service. Cheaply cloneable.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
}

impl IdentityClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self { http }
    }

    /// Verify credentials against `{base_url}/auth/login`.
    ///
    /// Returns the tracker's token payload verbatim so clients of the login
    /// proxy see the same shape they would get from the tracker directly.
    pub async fn login(
        &self,
        base_url: &str,
        email: &str,
        password: &str,
    ) -> Result<serde_json::Value, IdentityError> {
        let url = format!("{}/auth/login", base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            return Err(IdentityError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(IdentityError::Unavailable(format!(
                "login returned status {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;

        // A 200 without a token is still a failed login (tracker quirk).
        if body.get("access_token").is_none() {
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(body)
    }

    /// Validate a bearer token against `{base_url}/auth/authenticated`.
    pub async fn authenticated_user(
        &self,
        base_url: &str,
        token: &str,
    ) -> Result<TrackerUser, IdentityError> {
        let url = format!("{}/auth/authenticated", base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body: AuthenticatedResponse = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::Malformed(e.to_string()))?;
                Ok(body.user.unwrap_or_default())
            }
            StatusCode::UNAUTHORIZED => Err(IdentityError::InvalidToken),
            other => Err(IdentityError::Unavailable(format!(
                "token validation returned status {other}"
            ))),
        }
    }
}

impl Default for IdentityClient {
    fn default() -> Self {
        Self::new()
    }
}
