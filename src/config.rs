//! Configuration management for the shelf search server.
//!
//! Every setting has a compiled-in default; environment variables (optionally from a
//! `.env` file) override them. Loading never prints to stdout, which MCP uses for
//! communication.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Published CSV export of the store directory sheet.
pub const DEFAULT_DIRECTORY_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vS2iABeNRjSNn_F__Dcd4SAJWYwno0ajUk9tyRf9WmY240V28Q3jZMxW6NBpZWNtc0visIoj128Kc__/pub?gid=0&single=true&output=csv";

/// Published CSV export of the FAQ sheet.
pub const DEFAULT_FAQ_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT_rXkbRD1rRq3Fb08uX5fboYgmbqWWKKNB9poXgu1Bv1wHklLmz67_PcEvcTpkBPKfyjq3VIYy32Rl/pub?output=csv";

/// Default fuzzy match threshold (0 = exact only, 1 = match anything).
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.4;

/// Configuration for the shelf search server.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the directory CSV export
    pub directory_csv_url: String,

    /// URL of the FAQ CSV export
    pub faq_csv_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Fuzzy match threshold, 0.0-1.0 (default: 0.4)
    pub match_threshold: f64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `DIRECTORY_CSV_URL`: directory export URL (default: published sheet)
    /// - `FAQ_CSV_URL`: FAQ export URL (default: published sheet)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MATCH_THRESHOLD`: fuzzy threshold between 0 and 1 (default: 0.4)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();

        let directory_csv_url =
            Self::parse_env_url("DIRECTORY_CSV_URL", DEFAULT_DIRECTORY_CSV_URL)?;
        let faq_csv_url = Self::parse_env_url("FAQ_CSV_URL", DEFAULT_FAQ_CSV_URL)?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let match_threshold = Self::parse_env_f64("MATCH_THRESHOLD", DEFAULT_MATCH_THRESHOLD)?;
        if !(0.0..=1.0).contains(&match_threshold) {
            return Err(ConfigError::InvalidValue {
                var: "MATCH_THRESHOLD".to_string(),
                reason: "Must be between 0 and 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            directory_csv_url,
            faq_csv_url,
            request_timeout,
            match_threshold,
            log_level,
        })
    }

    /// Read a URL variable, falling back to `default`, and require an http(s) scheme.
    fn parse_env_url(var_name: &str, default: &str) -> ConfigResult<String> {
        let url = env::var(var_name).unwrap_or_else(|_| default.to_string());
        let url = url.trim().to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        Ok(url)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as f64 with a default value.
    fn parse_env_f64(var_name: &str, default: f64) -> ConfigResult<f64> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a decimal number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            directory_csv_url: DEFAULT_DIRECTORY_CSV_URL.to_string(),
            faq_csv_url: DEFAULT_FAQ_CSV_URL.to_string(),
            request_timeout: 10,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ALL_VARS: [&str; 5] = [
        "DIRECTORY_CSV_URL",
        "FAQ_CSV_URL",
        "REQUEST_TIMEOUT",
        "MATCH_THRESHOLD",
        "LOG_LEVEL",
    ];

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            for var in ALL_VARS {
                env::remove_var(var);
            }
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.directory_csv_url, DEFAULT_DIRECTORY_CSV_URL);
        assert_eq!(config.faq_csv_url, DEFAULT_FAQ_CSV_URL);
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.match_threshold, 0.4);
    }

    #[test]
    #[serial]
    fn test_config_from_env_uses_defaults() {
        let _guard = EnvGuard::new();

        let config = Config::from_env().unwrap();
        assert!(config.directory_csv_url.starts_with("https://"));
        assert!(config.faq_csv_url.starts_with("https://"));
        assert_eq!(config.match_threshold, DEFAULT_MATCH_THRESHOLD);
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("FAQ_CSV_URL", "ftp://example.com/faq.csv");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "FAQ_CSV_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid_overrides() {
        let mut guard = EnvGuard::new();
        guard.set("DIRECTORY_CSV_URL", "http://localhost:8080/dir.csv");
        guard.set("REQUEST_TIMEOUT", "3");
        guard.set("MATCH_THRESHOLD", "0.25");

        let config = Config::from_env().unwrap();
        assert_eq!(config.directory_csv_url, "http://localhost:8080/dir.csv");
        assert_eq!(config.request_timeout, 3);
        assert_eq!(config.match_threshold, 0.25);
    }

    #[test]
    #[serial]
    fn test_config_threshold_out_of_range() {
        let mut guard = EnvGuard::new();
        guard.set("MATCH_THRESHOLD", "1.5");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "MATCH_THRESHOLD"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_timeout_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("REQUEST_TIMEOUT", "0");

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_U64_INVALID", 10);
        assert!(result.is_err());

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }
}
