use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub scholar_rate_limit: u32,
    pub scholar_rate_window_secs: u64,
    pub scholar_timeout_secs: u64,
    /// Optional JSON catalogue replacing the built-in templates.
    pub catalogue_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 5 * 1024 * 1024,
            scholar_rate_limit: 10,
            scholar_rate_window_secs: 60,
            scholar_timeout_secs: 15,
            catalogue_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            scholar_rate_limit: env_or("SCHOLAR_RATE_LIMIT", defaults.scholar_rate_limit)?,
            scholar_rate_window_secs: env_or(
                "SCHOLAR_RATE_WINDOW_SECS",
                defaults.scholar_rate_window_secs,
            )?,
            scholar_timeout_secs: env_or("SCHOLAR_TIMEOUT_SECS", defaults.scholar_timeout_secs)?,
            catalogue_path: std::env::var("CATALOGUE_PATH").ok().map(PathBuf::from),
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
