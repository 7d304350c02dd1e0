//! Configuration Module
//!
//! Loads server configuration from environment variables. Missing variables
//! fall back to defaults; variables that are present but non-numeric or
//! zero are rejected at startup instead of being silently replaced.

use std::env;

use thiserror::Error;

// == Config Error ==
/// Configuration validation failure, reported at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value could not be parsed as an integer
    #[error("Invalid value for {key}: '{value}' is not a valid integer")]
    NotNumeric { key: &'static str, value: String },

    /// Value parsed but is not usable (zero)
    #[error("Invalid value for {key}: must be a positive integer")]
    NotPositive { key: &'static str },
}

// == Config ==
/// Server configuration parameters.
///
/// Durations are kept in milliseconds internally; the environment expresses
/// them in seconds.
#[derive(Debug, Clone)]
pub struct Config {
    /// Requests allowed per rate-limit window
    pub max_requests: u32,
    /// Rate-limit window length in milliseconds
    pub window_ms: u64,
    /// Cooldown applied to clients that exceed the limit, in milliseconds
    pub block_duration_ms: u64,
    /// Interval between limiter sweep runs, in milliseconds
    pub limiter_sweep_interval_ms: u64,
    /// Default TTL for cached search results, in milliseconds
    pub cache_ttl_ms: u64,
    /// Interval between cache sweep runs, in milliseconds
    pub cache_sweep_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Optional path to a JSON file of documents to seed the search index
    pub content_file: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests per window (default: 10)
    /// - `RATE_LIMIT_WINDOW_SECONDS` - Window length (default: 60)
    /// - `RATE_LIMIT_BLOCK_DURATION_SECONDS` - Cooldown (default: 300)
    /// - `RATE_LIMIT_SWEEP_INTERVAL_SECONDS` - Limiter sweep (default: 300)
    /// - `CACHE_TTL_SECONDS` - Result TTL (default: 300)
    /// - `CACHE_SWEEP_INTERVAL_SECONDS` - Cache sweep (default: 600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CONTENT_FILE` - Optional JSON seed for the search index
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            max_requests: positive_u32("RATE_LIMIT_MAX_REQUESTS", 10)?,
            window_ms: positive_secs_as_ms("RATE_LIMIT_WINDOW_SECONDS", 60)?,
            block_duration_ms: positive_secs_as_ms("RATE_LIMIT_BLOCK_DURATION_SECONDS", 300)?,
            limiter_sweep_interval_ms: positive_secs_as_ms("RATE_LIMIT_SWEEP_INTERVAL_SECONDS", 300)?,
            cache_ttl_ms: positive_secs_as_ms("CACHE_TTL_SECONDS", 300)?,
            cache_sweep_interval_ms: positive_secs_as_ms("CACHE_SWEEP_INTERVAL_SECONDS", 600)?,
            server_port: positive_u16("SERVER_PORT", 3000)?,
            content_file: env::var("CONTENT_FILE").ok(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_ms: 60_000,
            block_duration_ms: 300_000,
            limiter_sweep_interval_ms: 300_000,
            cache_ttl_ms: 300_000,
            cache_sweep_interval_ms: 600_000,
            server_port: 3000,
            content_file: None,
        }
    }
}

// == Parsing Helpers ==
fn positive_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    let raw = match env::var(key) {
        Ok(raw) => raw,
        Err(_) => return Ok(default),
    };

    let parsed: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::NotNumeric { key, value: raw })?;

    if parsed == 0 {
        return Err(ConfigError::NotPositive { key });
    }

    Ok(parsed)
}

fn positive_secs_as_ms(key: &'static str, default_secs: u64) -> Result<u64, ConfigError> {
    Ok(positive_u64(key, default_secs)? * 1000)
}

fn positive_u32(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    let value = positive_u64(key, u64::from(default))?;
    u32::try_from(value).map_err(|_| ConfigError::NotNumeric {
        key,
        value: value.to_string(),
    })
}

fn positive_u16(key: &'static str, default: u16) -> Result<u16, ConfigError> {
    let value = positive_u64(key, u64::from(default))?;
    u16::try_from(value).map_err(|_| ConfigError::NotNumeric {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window_ms, 60_000);
        assert_eq!(config.block_duration_ms, 300_000);
        assert_eq!(config.cache_ttl_ms, 300_000);
        assert_eq!(config.cache_sweep_interval_ms, 600_000);
        assert_eq!(config.server_port, 3000);
        assert!(config.content_file.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("RATE_LIMIT_MAX_REQUESTS");
        env::remove_var("RATE_LIMIT_WINDOW_SECONDS");
        env::remove_var("RATE_LIMIT_BLOCK_DURATION_SECONDS");
        env::remove_var("RATE_LIMIT_SWEEP_INTERVAL_SECONDS");
        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("CACHE_SWEEP_INTERVAL_SECONDS");
        env::remove_var("SERVER_PORT");
        env::remove_var("CONTENT_FILE");

        let config = Config::from_env().unwrap();
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window_ms, 60_000);
        assert_eq!(config.server_port, 3000);
    }

    // Each test below uses its own env key so parallel tests cannot race.

    #[test]
    fn test_non_numeric_value_is_rejected() {
        env::set_var("TEST_CFG_NOT_NUMERIC", "not-a-number");
        let result = positive_u64("TEST_CFG_NOT_NUMERIC", 5);
        env::remove_var("TEST_CFG_NOT_NUMERIC");

        assert!(matches!(result, Err(ConfigError::NotNumeric { .. })));
    }

    #[test]
    fn test_zero_value_is_rejected() {
        env::set_var("TEST_CFG_ZERO", "0");
        let result = positive_u64("TEST_CFG_ZERO", 5);
        env::remove_var("TEST_CFG_ZERO");

        assert!(matches!(result, Err(ConfigError::NotPositive { .. })));
    }

    #[test]
    fn test_valid_value_is_accepted() {
        env::set_var("TEST_CFG_VALID", "42");
        let result = positive_u64("TEST_CFG_VALID", 5);
        env::remove_var("TEST_CFG_VALID");

        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_missing_value_takes_default() {
        assert_eq!(positive_u64("TEST_CFG_MISSING", 7).unwrap(), 7);
    }

    #[test]
    fn test_port_out_of_range_is_rejected() {
        env::set_var("TEST_CFG_PORT", "70000");
        let result = positive_u16("TEST_CFG_PORT", 3000);
        env::remove_var("TEST_CFG_PORT");

        assert!(matches!(result, Err(ConfigError::NotNumeric { .. })));
    }
}
