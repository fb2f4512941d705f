//! Application configuration loading from environment variables.
//!
//! All configuration is read from the environment at startup (a `.env` file is
//! honoured via `dotenvy`). Nothing is strictly required: without `DATABASE_URL`
//! the service runs on an in-memory store, and without `REDIS_URL` caching,
//! view de-duplication and rate limiting are kept in process memory.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: "info,vibe_index_api=debug,tower_http=debug")
//! - `DATABASE_URL`: PostgreSQL connection string
//! - `DATABASE_MAX_CONNECTIONS`: DB pool size (default: 20)
//! - `REDIS_URL`: Redis connection URL
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origins for release builds
//! - `RATE_LIMIT_SUBMISSIONS_PER_IP`: Submissions per IP per day, 0 = unlimited (default: 20)
//! - `VIEW_SESSION_TTL_SECONDS`: How long a session's view stays de-duplicated (default: 1800)
//! - `LISTING_CACHE_TTL_SECONDS`: Listing cache lifetime, 0 = disabled (default: 30)
//! - `SEED_DEMO_PROJECTS`: Seed the in-memory store with demo projects (default: true)
//! - `IGNORE_MISSING_MIGRATIONS`: Skip missing migrations (default: true)

use serde::Deserialize;

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// PostgreSQL connection string; `None` selects the in-memory backend
    pub database_url: Option<String>,

    /// Maximum number of concurrent database connections
    pub database_max_connections: u32,

    /// Redis URL; `None` keeps ephemeral state in process memory
    pub redis_url: Option<String>,

    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Origins allowed by CORS in release builds
    pub allowed_origins: Vec<String>,

    /// Maximum submissions per client IP per UTC day (0 disables the limit)
    pub rate_limit_submissions_per_ip: u32,

    /// Window during which repeat views from one session are not counted
    pub view_session_ttl_seconds: u64,

    /// Lifetime of cached listing pages (0 disables caching)
    pub listing_cache_ttl_seconds: u64,

    /// Fill the in-memory backend with showcase projects on startup
    pub seed_demo_projects: bool,

    /// Skip missing migrations during startup
    pub ignore_missing_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed to the
    /// expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env_optional("DATABASE_URL"),
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 20)?,
            redis_url: env_optional("REDIS_URL"),
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            allowed_origins: env_optional("ALLOWED_ORIGINS")
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
            rate_limit_submissions_per_ip: env_or("RATE_LIMIT_SUBMISSIONS_PER_IP", 20)?,
            view_session_ttl_seconds: env_or("VIEW_SESSION_TTL_SECONDS", 1800)?,
            listing_cache_ttl_seconds: env_or("LISTING_CACHE_TTL_SECONDS", 30)?,
            seed_demo_projects: env_or("SEED_DEMO_PROJECTS", true)?,
            ignore_missing_migrations: env_or("IGNORE_MISSING_MIGRATIONS", true)?,
        })
    }
}

/// Load an optional environment variable, treating blank values as unset.
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
