//! HTTP backend abstraction for product APIs.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use detect_core::ProxyConfig;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::{ProductHttpError, ProductHttpResult};

// ============================================================================
// Request / Response
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A product API request, independent of the HTTP client in use.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub form: Option<Vec<(String, String)>>,
}

impl ApiRequest {
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: Vec::new(),
            form: None,
        }
    }

    pub const fn post(url: Url) -> Self {
        Self {
            method: Method::Post,
            url,
            headers: Vec::new(),
            form: None,
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the `Accept` header (vendor media types select API versions).
    #[must_use]
    pub fn accept(self, mime_type: &str) -> Self {
        self.header("Accept", mime_type)
    }

    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Send an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.form = Some(
            fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        self
    }
}

/// A fully-read response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// All values of a header, compared case-insensitively.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Turn non-2xx statuses into errors.
    pub fn error_for_status(self, url: &Url) -> ProductHttpResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        match self.status {
            401 | 403 => Err(ProductHttpError::Unauthorized {
                status: self.status,
                url: url.to_string(),
            }),
            status => Err(ProductHttpError::ApiRequestFailed {
                status,
                url: url.to_string(),
            }),
        }
    }

    /// Decode the body as a single JSON object.
    pub fn json<T: DeserializeOwned>(&self) -> ProductHttpResult<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that execute product API requests.
///
/// This is an implementation detail - external code should use the
/// connectivity checkers and product clients.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ProductHttpResult<ApiResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Per-server connection settings.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub timeout: Duration,
    pub trust_cert: bool,
    pub proxy: Option<ProxyConfig>,
}

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors. Client errors (4xx) fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    /// Create a backend for one server.
    pub fn new(http: &HttpClientConfig, settings: &ConnectionSettings) -> ProductHttpResult<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(http.user_agent.clone())
            .danger_accept_invalid_certs(settings.trust_cert);

        if let Some(proxy) = &settings.proxy {
            let mut reqwest_proxy = reqwest::Proxy::all(proxy.url())?;
            if let (Some(username), Some(password)) = (&proxy.username, &proxy.password) {
                reqwest_proxy = reqwest_proxy.basic_auth(username, password);
            }
            builder = builder.proxy(reqwest_proxy);
        }

        Ok(Self {
            client: builder.build()?,
            max_retries: http.max_retries,
            retry_base_delay: http.retry_base_delay,
        })
    }

    fn build_request(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url.as_str()),
            Method::Post => self.client.post(request.url.as_str()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }
        builder
    }

    async fn send_once(&self, request: &ApiRequest) -> ProductHttpResult<ApiResponse> {
        let response = self.build_request(request).send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: ApiRequest) -> ProductHttpResult<ApiResponse> {
        let mut attempt: u8 = 0;
        loop {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                tokio::time::sleep(delay).await;
            }

            let error = match self.send_once(&request).await {
                // 5xx errors are retryable (server-side issues)
                Ok(response) if response.status >= 500 && attempt < self.max_retries => {
                    ProductHttpError::ApiRequestFailed {
                        status: response.status,
                        url: request.url.to_string(),
                    }
                }
                Ok(response) => return Ok(response),
                Err(err) if err.is_transient() && attempt < self.max_retries => err,
                Err(err) => return Err(err),
            };

            debug!(
                url = %request.url,
                attempt = attempt + 1,
                error = %error,
                "Transient product request failure, retrying"
            );
            attempt += 1;
        }
    }
}

/// Append an API path to a server base URL, keeping any context path.
pub fn endpoint(base_url: &Url, path: &str) -> ProductHttpResult<Url> {
    let base = base_url.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}{path}"))?)
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
