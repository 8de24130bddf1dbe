//! # Core Configuration Module
//!
//! Provides configuration management for the Channel Showcase Core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `ShowcaseConfig` instance that holds all dependencies and settings the
//! core needs. It enforces fail-fast validation: an API key and a channel
//! identifier are required inputs, and their absence is a fatal
//! configuration error — no request may be attempted without them.
//!
//! ## Required Inputs
//!
//! - `api_key` - Upstream API key
//! - `channel_id` - Channel identifier to showcase
//!
//! ## Optional Dependencies (with defaults)
//!
//! - `HttpClient` - HTTP transport (default: reqwest-based)
//! - `Clock` - Time source (default: system clock)
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::ShowcaseConfig;
//!
//! let config = ShowcaseConfig::builder()
//!     .api_key("AIza...")
//!     .channel_id("UCxyz")
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use bridge_http::{Clock, HttpClient};
use std::sync::Arc;
use std::time::Duration;

/// Environment variable holding the upstream API key.
pub const ENV_API_KEY: &str = "SHOWCASE_API_KEY";

/// Environment variable holding the channel identifier.
pub const ENV_CHANNEL_ID: &str = "SHOWCASE_CHANNEL_ID";

/// Core configuration for the Channel Showcase Core.
///
/// Holds all dependencies and settings required to initialize the core.
/// Use [`ShowcaseConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct ShowcaseConfig {
    /// Upstream API key (required)
    pub api_key: String,

    /// Channel identifier to showcase (required)
    pub channel_id: String,

    /// HTTP client for upstream requests (optional, reqwest default)
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Time source (optional, system clock default)
    pub clock: Option<Arc<dyn Clock>>,

    /// Time-to-live for cached upstream responses
    pub cache_ttl: Duration,

    /// Interval between scheduled cache eviction sweeps
    pub cache_sweep_interval: Duration,

    /// Number of videos requested per gallery page
    pub page_size: u32,

    /// Maximum attempts per upstream request
    pub retry_max_attempts: u32,

    /// Base delay before the first retry; doubles per attempt
    pub retry_base_delay: Duration,

    /// Upper bound on any single retry delay
    pub retry_max_delay: Duration,

    /// Autoplay advancement interval for the carousel
    pub tick_interval: Duration,

    /// Horizontal pointer travel required for a swipe, in layout units
    pub drag_threshold: f64,

    /// Fraction of the carousel region that must be in the viewport to
    /// count as visible
    pub visibility_threshold: f64,

    /// Event bus buffer size
    pub event_buffer: usize,
}

impl std::fmt::Debug for ShowcaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowcaseConfig")
            .field("api_key", &"***")
            .field("channel_id", &self.channel_id)
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field("clock", &self.clock.as_ref().map(|_| "Clock { ... }"))
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_sweep_interval", &self.cache_sweep_interval)
            .field("page_size", &self.page_size)
            .field("retry_max_attempts", &self.retry_max_attempts)
            .field("retry_base_delay", &self.retry_base_delay)
            .field("retry_max_delay", &self.retry_max_delay)
            .field("tick_interval", &self.tick_interval)
            .field("drag_threshold", &self.drag_threshold)
            .field("visibility_threshold", &self.visibility_threshold)
            .field("event_buffer", &self.event_buffer)
            .finish()
    }
}

impl ShowcaseConfig {
    /// Creates a new builder for constructing a `ShowcaseConfig`.
    pub fn builder() -> ShowcaseConfigBuilder {
        ShowcaseConfigBuilder::default()
    }

    /// Builds a configuration from the environment.
    ///
    /// Reads [`ENV_API_KEY`] and [`ENV_CHANNEL_ID`]; everything else keeps
    /// its default. A missing variable is a configuration error distinct
    /// from any network failure.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| Error::Config(format!("Missing {} environment variable", ENV_API_KEY)))?;
        let channel_id = std::env::var(ENV_CHANNEL_ID).map_err(|_| {
            Error::Config(format!("Missing {} environment variable", ENV_CHANNEL_ID))
        })?;

        Self::builder().api_key(api_key).channel_id(channel_id).build()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - API key and channel id are non-empty
    /// - Page size is within the upstream's accepted range (1..=50)
    /// - Intervals and retry settings are non-zero
    /// - Thresholds are within their meaningful ranges
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key cannot be empty".to_string()));
        }

        if self.channel_id.is_empty() {
            return Err(Error::Config("Channel id cannot be empty".to_string()));
        }

        if self.page_size == 0 || self.page_size > 50 {
            return Err(Error::Config(
                "Page size must be between 1 and 50".to_string(),
            ));
        }

        if self.retry_max_attempts == 0 {
            return Err(Error::Config(
                "Retry attempts must be at least 1".to_string(),
            ));
        }

        if self.retry_base_delay.is_zero() {
            return Err(Error::Config(
                "Retry base delay must be greater than zero".to_string(),
            ));
        }

        if self.cache_ttl.is_zero() {
            return Err(Error::Config(
                "Cache TTL must be greater than zero".to_string(),
            ));
        }

        if self.tick_interval.is_zero() {
            return Err(Error::Config(
                "Autoplay interval must be greater than zero".to_string(),
            ));
        }

        if self.drag_threshold <= 0.0 {
            return Err(Error::Config(
                "Drag threshold must be greater than zero".to_string(),
            ));
        }

        if self.visibility_threshold <= 0.0 || self.visibility_threshold > 1.0 {
            return Err(Error::Config(
                "Visibility threshold must be within (0, 1]".to_string(),
            ));
        }

        if self.event_buffer == 0 {
            return Err(Error::Config(
                "Event buffer must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`ShowcaseConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](ShowcaseConfigBuilder::build) to create the final
/// config. The builder validates required inputs and provides actionable
/// error messages.
#[derive(Default)]
pub struct ShowcaseConfigBuilder {
    api_key: Option<String>,
    channel_id: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    clock: Option<Arc<dyn Clock>>,
    cache_ttl: Option<Duration>,
    cache_sweep_interval: Option<Duration>,
    page_size: Option<u32>,
    retry_max_attempts: Option<u32>,
    retry_base_delay: Option<Duration>,
    retry_max_delay: Option<Duration>,
    tick_interval: Option<Duration>,
    drag_threshold: Option<f64>,
    visibility_threshold: Option<f64>,
    event_buffer: Option<usize>,
}

impl ShowcaseConfigBuilder {
    /// Sets the upstream API key (required).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the channel identifier (required).
    pub fn channel_id(mut self, id: impl Into<String>) -> Self {
        self.channel_id = Some(id.into());
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the reqwest-based default is constructed at
    /// session start.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the time source. Defaults to the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the cache TTL. Default: 5 minutes.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Sets the cache sweep interval. Default: 60 seconds.
    pub fn cache_sweep_interval(mut self, interval: Duration) -> Self {
        self.cache_sweep_interval = Some(interval);
        self
    }

    /// Sets the gallery page size. Default: 5.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets the maximum attempts per upstream request. Default: 3.
    pub fn retry_max_attempts(mut self, attempts: u32) -> Self {
        self.retry_max_attempts = Some(attempts);
        self
    }

    /// Sets the base retry delay. Default: 1 second.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = Some(delay);
        self
    }

    /// Sets the per-attempt retry delay cap. Default: 30 seconds.
    pub fn retry_max_delay(mut self, delay: Duration) -> Self {
        self.retry_max_delay = Some(delay);
        self
    }

    /// Sets the autoplay advancement interval. Default: 5 seconds.
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = Some(interval);
        self
    }

    /// Sets the swipe travel threshold. Default: 50 units.
    pub fn drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = Some(threshold);
        self
    }

    /// Sets the visibility threshold. Default: 0.2 (20% of the region).
    pub fn visibility_threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = Some(threshold);
        self
    }

    /// Sets the event bus buffer size. Default: 100.
    pub fn event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = Some(capacity);
        self
    }

    /// Builds the final `ShowcaseConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or channel id is missing, or if any
    /// setting fails validation.
    pub fn build(self) -> Result<ShowcaseConfig> {
        let api_key = self.api_key.ok_or_else(|| {
            Error::Config("API key is required. Use .api_key() to set it.".to_string())
        })?;

        let channel_id = self.channel_id.ok_or_else(|| {
            Error::Config("Channel id is required. Use .channel_id() to set it.".to_string())
        })?;

        let config = ShowcaseConfig {
            api_key,
            channel_id,
            http_client: self.http_client,
            clock: self.clock,
            cache_ttl: self.cache_ttl.unwrap_or(Duration::from_secs(300)),
            cache_sweep_interval: self
                .cache_sweep_interval
                .unwrap_or(Duration::from_secs(60)),
            page_size: self.page_size.unwrap_or(5),
            retry_max_attempts: self.retry_max_attempts.unwrap_or(3),
            retry_base_delay: self.retry_base_delay.unwrap_or(Duration::from_secs(1)),
            retry_max_delay: self.retry_max_delay.unwrap_or(Duration::from_secs(30)),
            tick_interval: self.tick_interval.unwrap_or(Duration::from_secs(5)),
            drag_threshold: self.drag_threshold.unwrap_or(50.0),
            visibility_threshold: self.visibility_threshold.unwrap_or(0.2),
            event_buffer: self.event_buffer.unwrap_or(100),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> ShowcaseConfigBuilder {
        ShowcaseConfig::builder().api_key("key").channel_id("UC123")
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = ShowcaseConfig::builder().channel_id("UC123").build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("API key is required"));
    }

    #[test]
    fn test_builder_requires_channel_id() {
        let result = ShowcaseConfig::builder().api_key("key").build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Channel id is required"));
    }

    #[test]
    fn test_builder_rejects_empty_api_key() {
        let result = ShowcaseConfig::builder()
            .api_key("")
            .channel_id("UC123")
            .build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_builder_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.page_size, 5);
        assert_eq!(config.retry_max_attempts, 3);
        assert_eq!(config.retry_base_delay, Duration::from_secs(1));
        assert_eq!(config.retry_max_delay, Duration::from_secs(30));
        assert_eq!(config.tick_interval, Duration::from_secs(5));
        assert_eq!(config.drag_threshold, 50.0);
        assert_eq!(config.visibility_threshold, 0.2);
    }

    #[test]
    fn test_builder_with_custom_settings() {
        let config = base_builder()
            .page_size(10)
            .cache_ttl(Duration::from_secs(30))
            .tick_interval(Duration::from_millis(250))
            .build()
            .unwrap();

        assert_eq!(config.page_size, 10);
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let result = base_builder().page_size(0).build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("between 1 and 50"));
    }

    #[test]
    fn test_validate_rejects_oversized_page() {
        let result = base_builder().page_size(51).build();

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_visibility_threshold() {
        assert!(base_builder().visibility_threshold(0.0).build().is_err());
        assert!(base_builder().visibility_threshold(1.5).build().is_err());
        assert!(base_builder().visibility_threshold(1.0).build().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_retry_attempts() {
        let result = base_builder().retry_max_attempts(0).build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = base_builder().build().unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("key\""));
        assert!(rendered.contains("***"));
        assert!(rendered.contains("UC123"));
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = base_builder().build().unwrap();
        let cloned = config.clone();

        assert_eq!(cloned.channel_id, config.channel_id);
        assert_eq!(cloned.cache_ttl, config.cache_ttl);
    }
}
