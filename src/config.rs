//! Configuration management for the SDP MCP server.
//!
//! Settings are read once at startup from environment variables (or a `.env`
//! file loaded by `main`) and are immutable afterwards. The resulting
//! [`Config`] is handed to [`SdpClient::new`](crate::sdp_client::SdpClient::new)
//! explicitly; there is no global settings object.

use std::env;
use std::fmt;
use std::time::Duration;

use tracing::level_filters::LevelFilter;
use url::Url;

use crate::error::SdpError;

/// Base URL used when `SDP_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default outbound request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to ServiceDesk Plus.
///
/// The API key is stored but never logged; the `Debug` impl redacts it.
#[derive(Clone)]
pub struct Config {
    /// Base URL for the SDP instance, without trailing slash
    /// (e.g., `https://servicedesk.example.com`).
    pub base_url: String,

    /// Technician API key sent in the `authtoken` header.
    /// Empty when `SDP_API_KEY` is not set.
    api_key: String,

    /// Whether TLS certificates are verified.
    pub verify_ssl: bool,

    /// Verbosity for this crate's log output.
    pub log_level: LevelFilter,

    /// Upper bound on every outbound HTTP call.
    pub request_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SDP_URL`: base URL of the ServiceDesk Plus instance (default `http://localhost:8080`)
    /// - `SDP_API_KEY`: technician API key (missing is not fatal, see [`Config::has_api_key`])
    /// - `VERIFY_SSL`: `true` to verify certificates (default), anything else disables it
    /// - `LOG_LEVEL`: `DEBUG`, `INFO`, `WARNING`, `ERROR` or `CRITICAL` (default `INFO`)
    /// - `SDP_TIMEOUT_SECS`: outbound request timeout in seconds (default 30)
    ///
    /// # Errors
    ///
    /// Returns `SdpError::Config` if the base URL or timeout is malformed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, SdpError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Used by `from_env` and by tests that must not mutate the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SdpError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SDP_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Self::validate_base_url(base_url)?;

        let api_key = lookup("SDP_API_KEY")
            .map(|key| key.trim().to_string())
            .unwrap_or_default();

        let verify_ssl = lookup("VERIFY_SSL")
            .map(|value| Self::parse_verify_ssl(&value))
            .unwrap_or(true);

        let log_level = lookup("LOG_LEVEL")
            .map(|value| Self::parse_log_level(&value))
            .unwrap_or(LevelFilter::INFO);

        let request_timeout = match lookup("SDP_TIMEOUT_SECS") {
            Some(value) => Self::parse_timeout(&value)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Config {
            base_url,
            api_key,
            verify_ssl,
            log_level,
            request_timeout,
        })
    }

    /// Creates a configuration directly, mainly for tests and embedding.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SdpError> {
        Ok(Config {
            base_url: Self::validate_base_url(base_url.into())?,
            api_key: api_key.into(),
            verify_ssl: true,
            log_level: LevelFilter::INFO,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Overrides the outbound request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the API key.
    ///
    /// SECURITY: only for building the auth header and for sanitization.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns true if an API key was configured.
    ///
    /// A missing key does not stop the server; calls go out with an empty
    /// `authtoken` and the backend rejects them.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, SdpError> {
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&url)
            .map_err(|e| SdpError::invalid_config(format!("SDP_URL is not a valid URL: {}", e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SdpError::invalid_config(
                "SDP_URL must start with http:// or https://",
            ));
        }

        Ok(url)
    }

    fn parse_verify_ssl(value: &str) -> bool {
        value.trim().eq_ignore_ascii_case("true")
    }

    /// Maps the conventional level names onto a tracing filter.
    /// Unknown names fall back to INFO.
    fn parse_log_level(value: &str) -> LevelFilter {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => LevelFilter::DEBUG,
            "INFO" => LevelFilter::INFO,
            "WARNING" | "WARN" => LevelFilter::WARN,
            "ERROR" | "CRITICAL" | "FATAL" => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }

    fn parse_timeout(value: &str) -> Result<Duration, SdpError> {
        match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(SdpError::invalid_config(
                "SDP_TIMEOUT_SECS must be a positive number of seconds",
            )),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.has_api_key() { "[REDACTED]" } else { "" })
            .field("verify_ssl", &self.verify_ssl)
            .field("log_level", &self.log_level)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, SdpError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(!config.has_api_key());
        assert_eq!(config.api_key(), "");
        assert!(config.verify_ssl);
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_validate_base_url_removes_trailing_slash() {
        let result = Config::validate_base_url("https://example.com//".to_string()).unwrap();
        assert_eq!(result, "https://example.com");
    }

    #[test]
    fn test_validate_base_url_requires_scheme() {
        assert!(Config::validate_base_url("example.com".to_string()).is_err());
        assert!(Config::validate_base_url("ftp://example.com".to_string()).is_err());
    }

    #[test]
    fn test_api_key_loaded() {
        let config = load(&[("SDP_API_KEY", "abc123")]).unwrap();
        assert!(config.has_api_key());
        assert_eq!(config.api_key(), "abc123");
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = load(&[("SDP_API_KEY", "   ")]).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_verify_ssl_only_true_enables() {
        assert!(load(&[("VERIFY_SSL", "TRUE")]).unwrap().verify_ssl);
        assert!(!load(&[("VERIFY_SSL", "false")]).unwrap().verify_ssl);
        assert!(!load(&[("VERIFY_SSL", "1")]).unwrap().verify_ssl);
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(Config::parse_log_level("debug"), LevelFilter::DEBUG);
        assert_eq!(Config::parse_log_level("WARNING"), LevelFilter::WARN);
        assert_eq!(Config::parse_log_level("CRITICAL"), LevelFilter::ERROR);
        assert_eq!(Config::parse_log_level("chatty"), LevelFilter::INFO);
    }

    #[test]
    fn test_timeout_parsing() {
        let config = load(&[("SDP_TIMEOUT_SECS", "5")]).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(load(&[("SDP_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("SDP_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("https://example.com", "very_secret").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("very_secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
