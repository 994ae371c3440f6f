use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::evaluation::MAX_RESUMES_PER_REQUEST;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if `GEMINI_API_KEY` is missing or a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Budget for one candidate's oracle call, retries included.
    pub evaluation_timeout: Duration,
    pub oracle_max_retries: u32,
    pub max_concurrent_evaluations: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            evaluation_timeout: Duration::from_secs(parse_env("EVALUATION_TIMEOUT_SECS", 180)?),
            oracle_max_retries: parse_env("ORACLE_MAX_RETRIES", 3)?,
            max_concurrent_evaluations: parse_env(
                "MAX_CONCURRENT_EVALUATIONS",
                MAX_RESUMES_PER_REQUEST,
            )?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional numeric variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
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
