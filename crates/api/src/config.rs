use std::time::Duration as StdDuration;

use chrono::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and the signing secret have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deployment platform. `"dev"` unlocks `POST /admin/reset`.
    pub platform: String,
    /// Directory served under `/app` (default: `.`).
    pub filepath_root: String,
    /// Token signing and lifetime settings.
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:8080`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PLATFORM`             | empty                      |
    /// | `FILEPATH_ROOT`        | `.`                        |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values and on a missing `JWT_SECRET`
    /// (see [`AuthConfig::from_env`]).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let platform = std::env::var("PLATFORM").unwrap_or_default();
        let filepath_root = std::env::var("FILEPATH_ROOT").unwrap_or_else(|_| ".".into());

        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            platform,
            filepath_root,
            auth,
        }
    }

    /// Whether destructive development endpoints are enabled.
    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}

/// Default access token lifetime in seconds (1 hour).
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 3600;
/// Default refresh token lifetime in days.
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 60;
/// Default upper bound on a single auth store call, in seconds.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

/// Configuration for token issuance and validation.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret used to sign and verify access tokens.
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_ttl_secs: i64,
    /// Refresh token lifetime in days.
    pub refresh_token_ttl_days: i64,
    /// Upper bound on each auth store call, in seconds.
    pub store_timeout_secs: u64,
}

impl AuthConfig {
    /// Build a config with default lifetimes around the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_token_ttl_days: DEFAULT_REFRESH_TTL_DAYS,
            store_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
        }
    }

    /// Load auth configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | **yes**  | --      |
    /// | `JWT_ACCESS_TTL_SECS`     | no       | `3600`  |
    /// | `REFRESH_TOKEN_TTL_DAYS`  | no       | `60`    |
    /// | `AUTH_STORE_TIMEOUT_SECS` | no       | `5`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty, or if a lifetime is not positive.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_ttl_secs: i64 = std::env::var("JWT_ACCESS_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_TTL_SECS.to_string())
            .parse()
            .expect("JWT_ACCESS_TTL_SECS must be a valid i64");
        assert!(access_token_ttl_secs > 0, "JWT_ACCESS_TTL_SECS must be positive");

        let refresh_token_ttl_days: i64 = std::env::var("REFRESH_TOKEN_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_TTL_DAYS.to_string())
            .parse()
            .expect("REFRESH_TOKEN_TTL_DAYS must be a valid i64");
        assert!(refresh_token_ttl_days > 0, "REFRESH_TOKEN_TTL_DAYS must be positive");

        let store_timeout_secs: u64 = std::env::var("AUTH_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_STORE_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AUTH_STORE_TIMEOUT_SECS must be a valid u64");

        Self {
            secret,
            access_token_ttl_secs,
            refresh_token_ttl_days,
            store_timeout_secs,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::seconds(self.access_token_ttl_secs)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_ttl_days)
    }

    pub fn store_timeout(&self) -> StdDuration {
        StdDuration::from_secs(self.store_timeout_secs)
    }
}

// Hand-written so the secret never lands in logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .finish()
    }
}
