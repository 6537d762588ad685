//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use crate::errors::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the EcoSnap REST API (e.g. http://localhost:5001/api)
    pub api_url: String,
    /// Origin that serves uploaded proof media; `proofImage` paths are relative to it
    pub asset_url: String,
    /// Pre-issued bearer token, if the user already logged in elsewhere
    pub token: Option<String>,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// How long a successful upload stays on screen before the form resets
    pub reset_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: "http://localhost:5001/api".to_string(),
            asset_url: "http://localhost:5001".to_string(),
            token: None,
            request_timeout: Duration::from_secs(30),
            reset_delay: Duration::from_millis(1500),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            api_url: lookup("ECOSNAP_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            asset_url: lookup("ECOSNAP_ASSET_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.asset_url),
            token: lookup("ECOSNAP_TOKEN").filter(|t| !t.trim().is_empty()),
            request_timeout: parse_or(&lookup, "ECOSNAP_TIMEOUT_SECS", 30).map(Duration::from_secs)?,
            reset_delay: parse_or(&lookup, "ECOSNAP_RESET_DELAY_MS", 1500)
                .map(Duration::from_millis)?,
        })
    }

    /// Absolute URL for a server-relative proof media path.
    pub fn asset(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.asset_url, path.trim_start_matches('/'))
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ClientError::Config(format!("Invalid {key}"))),
    }
}
