//! Configuration for the Event Manager API client
//!
//! Built from the shared TOML configuration, with builder-style overrides
//! for tests and embedding.

use crate::error::{ApiError, ApiResult};
use eventmanager_core::config::{ConfigSchema, MAX_UTC_OFFSET_MINUTES};
use eventmanager_core::retry::{CircuitBreakerConfig, RetryConfig};
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("eventmanager-api-client/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, ending in `/`
    pub base_url: String,
    /// Total request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Circuit breaker configuration
    pub circuit_breaker: CircuitBreakerConfig,
    /// Log request and response bodies at trace level
    pub log_bodies: bool,
    /// UTC offset, in minutes, of event dates and times
    pub event_utc_offset_minutes: i32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_schema(&ConfigSchema::default())
    }
}

impl ClientConfig {
    /// Create configuration from the loaded TOML schema
    #[must_use]
    pub fn from_schema(schema: &ConfigSchema) -> Self {
        Self {
            base_url: schema.server.base_url(),
            timeout: Duration::from_secs(schema.http.timeout_secs),
            connect_timeout: Duration::from_secs(schema.http.connect_timeout_secs),
            retry: RetryConfig::with_max_retries(schema.http.max_retries),
            circuit_breaker: CircuitBreakerConfig::default(),
            log_bodies: schema.http.log_bodies,
            event_utc_offset_minutes: schema.server.event_utc_offset_minutes,
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = if url.ends_with('/') { url } else { format!("{url}/") };
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Builder-style method to set circuit breaker config
    #[must_use]
    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = config;
        self
    }

    /// Builder-style method to toggle body logging
    #[must_use]
    pub fn with_log_bodies(mut self, log_bodies: bool) -> Self {
        self.log_bodies = log_bodies;
        self
    }

    /// Builder-style method to set the event time zone offset
    #[must_use]
    pub fn with_event_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.event_utc_offset_minutes = minutes;
        self
    }

    /// Absolute URL for an endpoint path relative to the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "{} (must start with http:// or https://)",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.event_utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ApiError::config("event UTC offset must be within one day"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000/api/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.event_utc_offset_minutes, 300);
    }

    #[test]
    fn test_from_schema() {
        let mut schema = ConfigSchema::default();
        schema.server.host = "10.0.2.2".to_string();
        schema.http.max_retries = 0;
        schema.http.log_bodies = true;

        let config = ClientConfig::from_schema(&schema);
        assert_eq!(config.base_url, "http://10.0.2.2:8000/api/");
        assert_eq!(config.retry.max_attempts, 1);
        assert!(config.log_bodies);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://events.example.com/api")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://events.example.com/api/");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_url_for() {
        let config = ClientConfig::default();
        assert_eq!(config.url_for("events/"), "http://127.0.0.1:8000/api/events/");
        assert_eq!(config.url_for("/events/3/"), "http://127.0.0.1:8000/api/events/3/");
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());

        let invalid = ClientConfig::default().with_base_url("ftp://host");
        assert!(matches!(invalid.validate(), Err(ApiError::InvalidUrl(_))));

        let zero = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(zero.validate().is_err());

        let offset = ClientConfig::default().with_event_utc_offset_minutes(24 * 60);
        assert!(offset.validate().is_err());
    }
}
