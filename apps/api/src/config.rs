use anyhow::{Context, Result};

/// Decoded photo size accepted by the report endpoints.
pub const DEFAULT_MAX_PHOTO_BYTES: usize = 4 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub max_photo_bytes: usize,
    /// Extra attempts on 429/5xx. Zero means a failed call propagates immediately.
    pub llm_max_retries: u32,
    /// Per-request timeout for Gemini calls. `None` leaves it to the network stack.
    pub llm_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: optional_env("PORT")?.unwrap_or(8080),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_photo_bytes: optional_env("MAX_PHOTO_BYTES")?.unwrap_or(DEFAULT_MAX_PHOTO_BYTES),
            llm_max_retries: optional_env("LLM_MAX_RETRIES")?.unwrap_or(0),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(None),
    }
}
