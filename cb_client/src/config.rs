//! Client configuration from flags and environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub server_url: String,
    /// Player id to act as; prompted for at startup when absent.
    pub player_id: Option<String>,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Build a config from explicit overrides (usually CLI flags), falling
    /// back to `CRIBBAGE_SERVER_URL`, `CRIBBAGE_PLAYER_ID` and
    /// `CRIBBAGE_REQUEST_TIMEOUT_SECS`, then to defaults.
    pub fn from_env(
        server_override: Option<String>,
        player_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let server_url = server_override
            .or_else(|| env::var("CRIBBAGE_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let player_id = player_override.or_else(|| env::var("CRIBBAGE_PLAYER_ID").ok());
        let config = Self {
            server_url,
            player_id,
            request_timeout_secs: parse_env_or(
                "CRIBBAGE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "CRIBBAGE_SERVER_URL",
                reason: format!("'{}' is not an http(s) URL", self.server_url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "CRIBBAGE_REQUEST_TIMEOUT_SECS",
                reason: "timeout must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            player_id: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Parse an env var, falling back to a default when unset or malformed.
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("ignoring malformed {key}={raw}, using {default}");
            default
        }),
        Err(_) => default,
    }
}
