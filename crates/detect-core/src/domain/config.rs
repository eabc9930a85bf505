//! Per-product server configuration.
//!
//! These are the resolved connection settings a connectivity checker needs.
//! They are built once from properties by the composition root and carried
//! inside `ProductDecision::RunOnline`.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::Product;

/// Default timeout for product requests (`blackduck.timeout`, `polaris.timeout`).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP proxy settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Proxy URL in `http://host:port` form.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// How detect authenticates against Black Duck.
#[derive(Clone, PartialEq, Eq)]
pub enum BlackDuckCredentials {
    /// API token exchanged for a bearer token.
    ApiToken(String),
    /// Username and password login.
    UsernamePassword { username: String, password: String },
}

impl fmt::Debug for BlackDuckCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiToken(_) => f.write_str("ApiToken(***)"),
            Self::UsernamePassword { username, .. } => f
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Connection settings for a Black Duck server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackDuckServerConfig {
    pub url: Url,
    pub credentials: BlackDuckCredentials,
    pub timeout: Duration,
    /// Accept untrusted server certificates.
    pub trust_cert: bool,
    pub proxy: Option<ProxyConfig>,
}

impl BlackDuckServerConfig {
    /// Create a config with the default timeout, no proxy and strict TLS.
    #[must_use]
    pub const fn new(url: Url, credentials: BlackDuckCredentials) -> Self {
        Self {
            url,
            credentials,
            timeout: DEFAULT_TIMEOUT,
            trust_cert: false,
            proxy: None,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_trust_cert(mut self, trust_cert: bool) -> Self {
        self.trust_cert = trust_cert;
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }
}

/// Connection settings for a Polaris server.
#[derive(Clone, PartialEq, Eq)]
pub struct PolarisServerConfig {
    pub url: Url,
    pub access_token: String,
    pub timeout: Duration,
    pub proxy: Option<ProxyConfig>,
}

impl PolarisServerConfig {
    #[must_use]
    pub fn new(url: Url, access_token: impl Into<String>) -> Self {
        Self {
            url,
            access_token: access_token.into(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }
}

impl fmt::Debug for PolarisServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolarisServerConfig")
            .field("url", &self.url.as_str())
            .field("access_token", &"***")
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .finish()
    }
}

/// Server configuration for whichever product a decision targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductServerConfig {
    BlackDuck(BlackDuckServerConfig),
    Polaris(PolarisServerConfig),
}

impl ProductServerConfig {
    /// The product this configuration connects to.
    #[must_use]
    pub const fn product(&self) -> Product {
        match self {
            Self::BlackDuck(_) => Product::BlackDuck,
            Self::Polaris(_) => Product::Polaris,
        }
    }

    /// Base URL of the server.
    #[must_use]
    pub const fn url(&self) -> &Url {
        match self {
            Self::BlackDuck(config) => &config.url,
            Self::Polaris(config) => &config.url,
        }
    }
}

impl From<BlackDuckServerConfig> for ProductServerConfig {
    fn from(config: BlackDuckServerConfig) -> Self {
        Self::BlackDuck(config)
    }
}

impl From<PolarisServerConfig> for ProductServerConfig {
    fn from(config: PolarisServerConfig) -> Self {
        Self::Polaris(config)
    }
}
