//! Polaris client and connectivity checker.
//!
//! A Polaris connectivity check exchanges the access token for a JWT; a successful
//! exchange is the connectivity signal.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use detect_core::{
    ConnectivityChecker, ConnectivityResult, PolarisServerConfig, Product, ProductClient,
    ProductServerConfig,
};
use tracing::{debug, info};
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::{ProductHttpError, ProductHttpResult};
use crate::http::{ApiRequest, ConnectionSettings, HttpBackend, ReqwestBackend, endpoint};
use crate::models::PolarisAuthView;

const AUTH_PATH: &str = "/api/auth/authenticate";

/// An authenticated Polaris session.
pub struct PolarisClient {
    base_url: Url,
    jwt: String,
}

impl fmt::Debug for PolarisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolarisClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PolarisClient {
    pub(crate) async fn authenticate(
        backend: &dyn HttpBackend,
        server: &PolarisServerConfig,
    ) -> ProductHttpResult<Self> {
        let url = endpoint(&server.url, AUTH_PATH)?;
        let request = ApiRequest::post(url.clone())
            .accept("application/json")
            .form(&[("accesstoken", server.access_token.as_str())]);
        let view: PolarisAuthView = backend.execute(request).await?.error_for_status(&url)?.json()?;

        if view.jwt.is_empty() {
            return Err(ProductHttpError::InvalidResponse {
                message: "Polaris returned an empty token".to_string(),
            });
        }

        Ok(Self {
            base_url: server.url.clone(),
            jwt: view.jwt,
        })
    }

    /// Value for the `Authorization` header of later requests.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.jwt)
    }
}

#[async_trait]
impl ProductClient for PolarisClient {
    fn product(&self) -> Product {
        Product::Polaris
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Checks a Polaris server by authenticating with its access token.
pub struct PolarisConnectivityChecker {
    http: HttpClientConfig,
    backend: Option<Arc<dyn HttpBackend>>,
}

impl PolarisConnectivityChecker {
    #[must_use]
    pub const fn new(http: HttpClientConfig) -> Self {
        Self {
            http,
            backend: None,
        }
    }

    #[cfg(test)]
    fn with_backend(backend: Arc<dyn HttpBackend>) -> Self {
        Self {
            http: HttpClientConfig::default(),
            backend: Some(backend),
        }
    }

    async fn connect(&self, server: &PolarisServerConfig) -> ProductHttpResult<PolarisClient> {
        let backend: Arc<dyn HttpBackend> = match &self.backend {
            Some(backend) => Arc::clone(backend),
            None => {
                let settings = ConnectionSettings {
                    timeout: server.timeout,
                    trust_cert: false,
                    proxy: server.proxy.clone(),
                };
                Arc::new(ReqwestBackend::new(&self.http, &settings)?)
            }
        };
        PolarisClient::authenticate(backend.as_ref(), server).await
    }
}

#[async_trait]
impl ConnectivityChecker for PolarisConnectivityChecker {
    async fn determine_connectivity(&self, config: &ProductServerConfig) -> ConnectivityResult {
        let ProductServerConfig::Polaris(server) = config else {
            let err = ProductHttpError::WrongProduct {
                expected: Product::Polaris,
                actual: config.product(),
            };
            return ConnectivityResult::failure(err.to_string());
        };

        match self.connect(server).await {
            Ok(client) => {
                info!("Successfully connected to Polaris at {}", server.url);
                ConnectivityResult::success(Arc::new(client), config.clone())
            }
            Err(err) => {
                debug!(error = %err, "Polaris connectivity check failed");
                ConnectivityResult::failure(format!(
                    "Could not connect to Polaris at {}: {err}",
                    server.url
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use detect_core::{BlackDuckCredentials, BlackDuckServerConfig};
    use serde_json::json;

    fn polaris_config() -> ProductServerConfig {
        PolarisServerConfig::new(
            Url::parse("https://polaris.example.com").unwrap(),
            "access-token",
        )
        .into()
    }

    #[tokio::test]
    async fn test_successful_check_sends_access_token() {
        let backend = Arc::new(
            FakeBackend::new()
                .with_response(AUTH_PATH, CannedResponse::json(200, &json!({"jwt": "jwt-1"}))),
        );
        let checker = PolarisConnectivityChecker::with_backend(backend.clone());

        let result = checker.determine_connectivity(&polaris_config()).await;

        assert!(result.is_successfully_connected());
        let form = backend.requests()[0].form.clone().unwrap();
        assert_eq!(
            form,
            vec![("accesstoken".to_string(), "access-token".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_jwt_is_failure() {
        let backend = Arc::new(
            FakeBackend::new()
                .with_response(AUTH_PATH, CannedResponse::json(200, &json!({"jwt": ""}))),
        );
        let checker = PolarisConnectivityChecker::with_backend(backend);

        let result = checker.determine_connectivity(&polaris_config()).await;

        assert!(result.failure_reason().unwrap().contains("empty token"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_failure() {
        let checker = PolarisConnectivityChecker::with_backend(Arc::new(FakeBackend::new()));

        let result = checker.determine_connectivity(&polaris_config()).await;

        let reason = result.failure_reason().unwrap();
        assert!(reason.starts_with("Could not connect to Polaris at https://polaris.example.com/"));
    }

    #[tokio::test]
    async fn test_black_duck_config_is_rejected() {
        let checker = PolarisConnectivityChecker::with_backend(Arc::new(FakeBackend::new()));
        let config = BlackDuckServerConfig::new(
            Url::parse("https://blackduck.example.com").unwrap(),
            BlackDuckCredentials::ApiToken("t".to_string()),
        )
        .into();

        let result = checker.determine_connectivity(&config).await;

        assert!(result.failure_reason().unwrap().contains("Expected a Polaris"));
    }

    #[tokio::test]
    async fn test_authorization_header() {
        let backend = FakeBackend::new()
            .with_response(AUTH_PATH, CannedResponse::json(200, &json!({"jwt": "abc"})));
        let ProductServerConfig::Polaris(server) = polaris_config() else {
            unreachable!()
        };

        let client = PolarisClient::authenticate(&backend, &server).await.unwrap();

        assert_eq!(client.authorization_header(), "Bearer abc");
        assert_eq!(client.base_url().host_str(), Some("polaris.example.com"));
    }
}
