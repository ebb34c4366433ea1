use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::errors::AppError;
use crate::llm_client::DEFAULT_MODEL;
use crate::search::agent::SearchDelays;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub database_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub search_delays: SearchDelays,
    pub port: u16,
    pub rust_log: String,
}

/// Everything a stage needs to reach the completion endpoint.
/// Validated once at startup, never re-read per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub api_base_url: String,
    pub api_key: String,
}

impl PipelineConfig {
    pub fn new(api_base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AppError> {
        let api_base_url = api_base_url.into();
        let api_base_url = api_base_url.trim().trim_end_matches('/');
        if api_base_url.is_empty() {
            return Err(AppError::Configuration(
                "Missing completion API base URL (COMPLETION_API_BASE_URL)".to_string(),
            ));
        }

        let api_key = api_key.into();
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::Configuration(
                "Missing completion API key (COMPLETION_API_KEY)".to_string(),
            ));
        }

        Ok(Self {
            api_base_url: api_base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let pipeline = PipelineConfig::new(
            std::env::var("COMPLETION_API_BASE_URL").unwrap_or_default(),
            std::env::var("COMPLETION_API_KEY").unwrap_or_default(),
        )?;

        let search_delays = SearchDelays {
            analyze: Duration::from_millis(optional_env("SEARCH_ANALYZE_DELAY_MS", 1000)?),
            rank: Duration::from_millis(optional_env("SEARCH_RANK_DELAY_MS", 800)?),
        };

        Ok(Config {
            pipeline,
            database_url: require_env("DATABASE_URL")?,
            model: optional_env("COMPLETION_MODEL", DEFAULT_MODEL.to_string())?,
            request_timeout: Duration::from_secs(optional_env("COMPLETION_TIMEOUT_SECS", 120)?),
            search_delays,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or_default(std::env::var(key).ok(), default)
        .with_context(|| format!("Environment variable '{key}' has an invalid value"))
}

fn parse_or_default<T>(raw: Option<String>, default: T) -> Result<T, T::Err>
where
    T: FromStr,
{
    match raw {
        Some(value) if !value.trim().is_empty() => value.trim().parse::<T>(),
        _ => Ok(default),
    }
}
