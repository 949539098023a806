//! Configuration handling for the application.
//!
//! Everything is read from environment variables with sensible development
//! defaults, so the binary runs with zero setup. Numeric values are parsed
//! eagerly in `Config::from_env` and bad input surfaces as a `ConfigError`
//! instead of a late panic.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Environment variable names. Keeping them public lets tests refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_FETCH_CONNECT_TIMEOUT_SECS: &str = "FETCH_CONNECT_TIMEOUT_SECS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_MAX_BODY_BYTES: &str = "FETCH_MAX_BODY_BYTES";
pub const ENV_FETCH_MAX_REDIRECTS: &str = "FETCH_MAX_REDIRECTS";
pub const ENV_MAX_CONCURRENT_FETCHES: &str = "MAX_CONCURRENT_FETCHES";
pub const ENV_KEY_POINTS: &str = "KEY_POINTS";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_FETCH_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_FETCH_MAX_BODY_BYTES: u64 = 5 * 1024 * 1024;
const DEFAULT_FETCH_MAX_REDIRECTS: usize = 5;
const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 50;
const DEFAULT_KEY_POINTS: usize = 5;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    fetch_connect_timeout_secs: u64,
    fetch_timeout_secs: u64,
    fetch_max_body_bytes: u64,
    fetch_max_redirects: usize,
    max_concurrent_fetches: usize,
    key_points: usize,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let fetch_connect_timeout_secs = parse_var(
            ENV_FETCH_CONNECT_TIMEOUT_SECS,
            DEFAULT_FETCH_CONNECT_TIMEOUT_SECS,
        )?;
        let fetch_timeout_secs = parse_var(ENV_FETCH_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS)?;
        let fetch_max_body_bytes =
            parse_var(ENV_FETCH_MAX_BODY_BYTES, DEFAULT_FETCH_MAX_BODY_BYTES)?;
        let fetch_max_redirects = parse_var(ENV_FETCH_MAX_REDIRECTS, DEFAULT_FETCH_MAX_REDIRECTS)?;
        let max_concurrent_fetches =
            parse_var(ENV_MAX_CONCURRENT_FETCHES, DEFAULT_MAX_CONCURRENT_FETCHES)?;
        let key_points = parse_var(ENV_KEY_POINTS, DEFAULT_KEY_POINTS)?;

        if key_points == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_KEY_POINTS,
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            fetch_connect_timeout_secs,
            fetch_timeout_secs,
            fetch_max_body_bytes,
            fetch_max_redirects,
            max_concurrent_fetches,
            key_points,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Connect timeout for outbound fetches, in seconds.
    pub fn fetch_connect_timeout_secs(&self) -> u64 {
        self.fetch_connect_timeout_secs
    }
    /// Total-transfer timeout for outbound fetches, in seconds.
    pub fn fetch_timeout_secs(&self) -> u64 {
        self.fetch_timeout_secs
    }
    /// Maximum accepted response body size, in bytes.
    pub fn fetch_max_body_bytes(&self) -> u64 {
        self.fetch_max_body_bytes
    }
    /// Redirect hop limit for outbound fetches.
    pub fn fetch_max_redirects(&self) -> usize {
        self.fetch_max_redirects
    }
    /// Admission limit on concurrent in-flight fetches.
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }
    /// Number of key points returned per request.
    pub fn key_points(&self) -> usize {
        self.key_points
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            fetch_connect_timeout_secs: DEFAULT_FETCH_CONNECT_TIMEOUT_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            fetch_max_body_bytes: DEFAULT_FETCH_MAX_BODY_BYTES,
            fetch_max_redirects: DEFAULT_FETCH_MAX_REDIRECTS,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            key_points: DEFAULT_KEY_POINTS,
        }
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
