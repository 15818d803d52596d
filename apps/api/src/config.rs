use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::jobs::source::{DEFAULT_TIMEOUT, LINKEDIN_GUEST_URL};
use crate::llm_client::GROQ_API_URL;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub llm_endpoint: String,
    pub port: u16,
    pub rust_log: String,
    pub job_source_url: String,
    pub job_source_timeout: Duration,
    pub llm_timeout: Duration,
    /// Maximum consensus generations in flight for one batch request. Never below 1.
    pub consensus_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            llm_endpoint: std::env::var("GROQ_API_URL").unwrap_or_else(|_| GROQ_API_URL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            job_source_url: std::env::var("JOB_SOURCE_URL")
                .unwrap_or_else(|_| LINKEDIN_GUEST_URL.to_string()),
            job_source_timeout: Duration::from_secs(parse_env(
                "JOB_SOURCE_TIMEOUT_SECS",
                DEFAULT_TIMEOUT.as_secs(),
            )?),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 60)?),
            consensus_concurrency: parse_env::<usize>("CONSENSUS_CONCURRENCY", 4)?.max(1),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T>
where
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u64 = parse_env("JOBSCOUT_TEST_UNSET_VARIABLE", 10).unwrap();
        assert_eq!(value, 10);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("JOBSCOUT_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("JOBSCOUT_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("JOBSCOUT_TEST_CONCURRENCY", " 7 ");
        let value: usize = parse_env("JOBSCOUT_TEST_CONCURRENCY", 4).unwrap();
        assert_eq!(value, 7);
    }
}
