//! Public configuration for product HTTP clients.
//!
//! Server-specific settings (URL, credentials, timeout, proxy) come from
//! the `ProductServerConfig` being checked; this covers what is shared by
//! every request detect makes.

use std::time::Duration;

/// Configuration shared by the product HTTP clients.
///
/// # Example
///
/// ```
/// use detect_products::HttpClientConfig;
///
/// let config = HttpClientConfig::new()
///     .with_max_retries(1)
///     .with_user_agent("detect/6.4.0");
/// ```
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("detect/", env!("CARGO_PKG_VERSION")).to_string(),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 2 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}
