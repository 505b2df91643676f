use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Key prefix under which résumé text objects are stored.
    pub resume_key_prefix: String,
    /// Redis pub/sub channel receiving passed-evaluation messages.
    pub badge_channel: String,
    /// How long a badge notification may take before it is abandoned.
    pub badge_timeout_ms: u64,
    pub batch_concurrency: usize,
    pub max_batch_size: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            resume_key_prefix: std::env::var("RESUME_KEY_PREFIX")
                .unwrap_or_else(|_| "resumes".to_string()),
            badge_channel: std::env::var("BADGE_CHANNEL")
                .unwrap_or_else(|_| "ats:badges:passed".to_string()),
            badge_timeout_ms: env_or("BADGE_TIMEOUT_MS", 2000)?,
            batch_concurrency: positive(env_or("BATCH_CONCURRENCY", 8)?, "BATCH_CONCURRENCY")?,
            max_batch_size: positive(env_or("MAX_BATCH_SIZE", 100)?, "MAX_BATCH_SIZE")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn positive(value: usize, key: &str) -> Result<usize> {
    if value == 0 {
        bail!("{key} must be at least 1");
    }
    Ok(value)
}
