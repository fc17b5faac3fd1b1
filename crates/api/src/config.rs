/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8741`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Default base URL of the production-tracker identity service.
    ///
    /// Optional: requests may supply their own via the `X-Tracker-Url`
    /// header, and login bodies via `tracker_url`.
    pub tracker_url: Option<String>,
    /// Refresh-token cookie settings for the login proxy.
    pub cookie: CookieConfig,
}

/// Settings for the refresh-token cookie set by `POST /auth/login`.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Cookie name (default: `refresh_token`).
    pub refresh_token_name: String,
    /// Mark the cookie `Secure` (default: `false`; enable behind TLS).
    pub secure: bool,
    /// Mark the cookie `HttpOnly` (default: `true`).
    pub http_only: bool,
    /// `SameSite` attribute value (default: `Lax`).
    pub same_site: String,
    /// Cookie lifetime in seconds (default: 7 days).
    pub max_age_secs: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `8741`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `30`                    |
    /// | `TRACKER_URL`               | unset                   |
    /// | `COOKIE_REFRESH_TOKEN_NAME` | `refresh_token`         |
    /// | `COOKIE_SECURE`             | `false`                 |
    /// | `COOKIE_HTTPONLY`           | `true`                  |
    /// | `COOKIE_SAMESITE`           | `Lax`                   |
    /// | `COOKIE_MAX_AGE`            | `604800` (7 days)       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8741".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let tracker_url = std::env::var("TRACKER_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            tracker_url,
            cookie: CookieConfig::from_env(),
        }
    }
}

impl CookieConfig {
    /// Load cookie settings from environment variables with defaults.
    pub fn from_env() -> Self {
        let refresh_token_name =
            std::env::var("COOKIE_REFRESH_TOKEN_NAME").unwrap_or_else(|_| "refresh_token".into());

        let secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        let http_only: bool = std::env::var("COOKIE_HTTPONLY")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("COOKIE_HTTPONLY must be true or false");

        let same_site = std::env::var("COOKIE_SAMESITE").unwrap_or_else(|_| "Lax".into());

        let max_age_secs: i64 = std::env::var("COOKIE_MAX_AGE")
            .unwrap_or_else(|_| "604800".into())
            .parse()
            .expect("COOKIE_MAX_AGE must be a valid i64");

        Self {
            refresh_token_name,
            secure,
            http_only,
            same_site,
            max_age_secs,
        }
    }

    /// Render the `Set-Cookie` value for a refresh token.
    pub fn build_refresh_cookie(&self, value: &str) -> String {
        let mut cookie = format!(
            "{}={}; Max-Age={}; Path=/; SameSite={}",
            self.refresh_token_name, value, self.max_age_secs, self.same_site
        );
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}
