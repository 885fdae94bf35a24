//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` - HMAC key for hashing session and reset tokens
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base URL used in emails and short links
//!   (default: `http://localhost:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `TASK_QUEUE_CAPACITY` - Delivery task buffer size (default: 10000)
//! - `TASK_MAX_ATTEMPTS` - Attempts per task before terminal failure (default: 5)
//! - `TASK_WORKER_CONCURRENCY` - Concurrent task attempts (default: 4)
//! - `TASK_TIME_LIMIT_SECONDS` - Hard per-attempt execution limit (default: 30)
//! - `SLUG_LENGTH` - Generated slug length (default: 8)
//! - `SESSION_TTL_SECONDS` - Session lifetime (default: 14 days)
//! - `RESET_TOKEN_TTL_SECONDS` - Reset token lifetime (default: 1 hour)
//! - `DB_MAX_CONNECTIONS` / `DB_CONNECT_TIMEOUT` - Pool tuning

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Public base URL; embedded in login links, reset links, and short URLs.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// HMAC signing secret used to hash session and reset tokens before
    /// storage. Must be non-empty.
    pub token_signing_secret: String,

    // ── Task runner ─────────────────────────────────────────────────────────
    pub task_queue_capacity: usize,
    pub task_max_attempts: u32,
    pub task_worker_concurrency: usize,
    pub task_time_limit_seconds: u64,

    // ── Links & accounts ────────────────────────────────────────────────────
    pub slug_length: usize,
    pub session_ttl_seconds: i64,
    pub reset_token_ttl_seconds: i64,

    // ── PgPool settings ─────────────────────────────────────────────────────
    pub db_max_connections: u32,
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or empty.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let token_signing_secret =
            env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
        if token_signing_secret.is_empty() {
            anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
        }

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            token_signing_secret,
            task_queue_capacity: parse_env("TASK_QUEUE_CAPACITY", 10_000),
            task_max_attempts: parse_env("TASK_MAX_ATTEMPTS", 5),
            task_worker_concurrency: parse_env("TASK_WORKER_CONCURRENCY", 4),
            task_time_limit_seconds: parse_env("TASK_TIME_LIMIT_SECONDS", 30),
            slug_length: parse_env("SLUG_LENGTH", 8),
            session_ttl_seconds: parse_env("SESSION_TTL_SECONDS", 14 * 24 * 3600),
            reset_token_ttl_seconds: parse_env("RESET_TOKEN_TTL_SECONDS", 3600),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10),
            db_connect_timeout: parse_env("DB_CONNECT_TIMEOUT", 30),
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
