// Configuration module: everything the client needs from the environment
// is read once at startup and carried around as a plain `Config` value.

use std::time::Duration;
use thiserror::Error;

pub const ENV_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_API_URL: &str = "NEWS_API_URL";
pub const ENV_COUNTRY: &str = "NEWS_COUNTRY";
pub const ENV_TIMEOUT_SECS: &str = "NEWS_API_TIMEOUT_SECS";

pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";
pub const DEFAULT_COUNTRY: &str = "us";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please set the NEWS_API_KEY environment variable")]
    MissingApiKey,
    #[error("NEWS_API_TIMEOUT_SECS must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { value: String },
}

/// Settings for one run of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    /// Full URL of the top-headlines endpoint.
    pub endpoint: String,
    /// Country code used by "show latest headlines".
    pub country: String,
    /// `None` leaves requests without a timeout.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build a `Config` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a `Config` from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;
        let endpoint = get(ENV_API_URL)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.into());
        let country = get(ENV_COUNTRY).unwrap_or_else(|| DEFAULT_COUNTRY.into());
        let timeout = match get(ENV_TIMEOUT_SECS) {
            None => None,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::InvalidTimeout { value: raw }),
            },
        };

        Ok(Config {
            api_key,
            endpoint,
            country,
            timeout,
        })
    }

    /// Config pointing at an arbitrary endpoint, mainly for tests and staging.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            country: DEFAULT_COUNTRY.into(),
            timeout: None,
        }
    }
}
