//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` so tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses. `spawn_tracker_stub` stands in for
//! the external production-tracker identity service.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Form;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use shotvault_api::auth::identity::IdentityClient;
use shotvault_api::config::{CookieConfig, ServerConfig};
use shotvault_api::routes;
use shotvault_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and the given tracker URL.
pub fn test_config(tracker_url: Option<String>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        tracker_url,
        cookie: CookieConfig {
            refresh_token_name: "refresh_token".to_string(),
            secure: false,
            http_only: true,
            same_site: "Lax".to_string(),
            max_age_secs: 604_800,
        },
    }
}

/// Spawn an in-process stand-in for the production tracker and return its
/// base URL.
///
/// - `GET /auth/authenticated` accepts any bearer token.
/// - `POST /auth/login` accepts any email with the password `secret`.
pub async fn spawn_tracker_stub() -> String {
    async fn authenticated(headers: HeaderMap) -> Response {
        match headers.get("authorization") {
            Some(_) => Json(json!({
                "authenticated": true,
                "user": { "id": "user-1", "full_name": "Test User", "email": "user@studio.test" },
            }))
            .into_response(),
            None => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "unauthorized" })),
            )
                .into_response(),
        }
    }

    async fn login(Form(params): Form<Vec<(String, String)>>) -> Response {
        let password = params
            .iter()
            .find(|(key, _)| key == "password")
            .map(|(_, value)| value.as_str());
        if password == Some("secret") {
            Json(json!({
                "access_token": "stub-access-token",
                "refresh_token": "stub-refresh-token",
            }))
            .into_response()
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "wrong credentials" })),
            )
                .into_response()
        }
    }

    let app = Router::new()
        .route("/auth/authenticated", get(authenticated))
        .route("/auth/login", post(login));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind tracker stub");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Build the full application router with all middleware layers, using the
/// given database pool and default tracker URL.
pub fn build_test_app(pool: PgPool, tracker_url: Option<String>) -> Router {
    let config = test_config(tracker_url);

    let state = AppState {
        pool,
        config: Arc::new(config),
        identity: IdentityClient::new(),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-tracker-url"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers (all send a bearer token the tracker stub accepts)
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    with_auth: bool,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if with_auth {
        builder = builder.header(AUTHORIZATION, "Bearer test-token");
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_req(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, true).await
}

pub async fn get_unauthenticated(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, false).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), true).await
}

pub async fn post_json_unauthenticated(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(body), false).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body), true).await
}

pub async fn delete_req(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, true).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
