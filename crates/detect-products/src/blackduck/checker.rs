use std::sync::Arc;

use async_trait::async_trait;
use detect_core::{
    BlackDuckServerConfig, ConnectivityChecker, ConnectivityResult, Product, ProductServerConfig,
};
use tracing::{debug, info};

use super::BlackDuckClient;
use crate::config::HttpClientConfig;
use crate::error::{ProductHttpError, ProductHttpResult};
use crate::http::{ConnectionSettings, HttpBackend, ReqwestBackend};

/// Checks a Black Duck server: authenticate, then read the server version.
pub struct BlackDuckConnectivityChecker {
    http: HttpClientConfig,
    backend: Option<Arc<dyn HttpBackend>>,
}

impl BlackDuckConnectivityChecker {
    #[must_use]
    pub const fn new(http: HttpClientConfig) -> Self {
        Self {
            http,
            backend: None,
        }
    }

    /// Use a fixed backend instead of building one per server.
    #[cfg(test)]
    pub(crate) fn with_backend(backend: Arc<dyn HttpBackend>) -> Self {
        Self {
            http: HttpClientConfig::default(),
            backend: Some(backend),
        }
    }

    fn backend_for(&self, server: &BlackDuckServerConfig) -> ProductHttpResult<Arc<dyn HttpBackend>> {
        if let Some(backend) = &self.backend {
            return Ok(Arc::clone(backend));
        }
        let settings = ConnectionSettings {
            timeout: server.timeout,
            trust_cert: server.trust_cert,
            proxy: server.proxy.clone(),
        };
        Ok(Arc::new(ReqwestBackend::new(&self.http, &settings)?))
    }

    async fn connect(&self, server: &BlackDuckServerConfig) -> ProductHttpResult<BlackDuckClient> {
        let client = BlackDuckClient::authenticate(self.backend_for(server)?, server).await?;
        let version = client.current_version().await?;
        info!(
            "Successfully connected to Black Duck (version {}) at {}",
            version.version, server.url
        );
        Ok(client)
    }
}

#[async_trait]
impl ConnectivityChecker for BlackDuckConnectivityChecker {
    async fn determine_connectivity(&self, config: &ProductServerConfig) -> ConnectivityResult {
        let ProductServerConfig::BlackDuck(server) = config else {
            let err = ProductHttpError::WrongProduct {
                expected: Product::BlackDuck,
                actual: config.product(),
            };
            return ConnectivityResult::failure(err.to_string());
        };

        debug!(url = %server.url, "Checking Black Duck connectivity");
        match self.connect(server).await {
            Ok(client) => ConnectivityResult::success(Arc::new(client), config.clone()),
            Err(err) => {
                debug!(error = %err, "Black Duck connectivity check failed");
                ConnectivityResult::failure(format!(
                    "Could not connect to Black Duck at {}: {err}",
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
    use detect_core::{BlackDuckCredentials, PolarisServerConfig};
    use serde_json::json;
    use url::Url;

    fn black_duck_config() -> ProductServerConfig {
        BlackDuckServerConfig::new(
            Url::parse("https://blackduck.example.com").unwrap(),
            BlackDuckCredentials::ApiToken("token".to_string()),
        )
        .into()
    }

    fn healthy_backend() -> FakeBackend {
        FakeBackend::new()
            .with_response(
                "/api/tokens/authenticate",
                CannedResponse::json(200, &json!({"bearerToken": "b"})),
            )
            .with_response(
                "/api/current-version",
                CannedResponse::json(200, &json!({"version": "2020.6.0"})),
            )
    }

    #[tokio::test]
    async fn test_successful_check_returns_client() {
        let checker = BlackDuckConnectivityChecker::with_backend(Arc::new(healthy_backend()));

        let result = checker.determine_connectivity(&black_duck_config()).await;

        let ConnectivityResult::Success(connection) = &result else {
            panic!("expected success, got {result:?}");
        };
        assert_eq!(connection.product(), Product::BlackDuck);
        assert_eq!(connection.client.product(), Product::BlackDuck);
    }

    #[tokio::test]
    async fn test_version_failure_is_reported() {
        let backend = FakeBackend::new().with_response(
            "/api/tokens/authenticate",
            CannedResponse::json(200, &json!({"bearerToken": "b"})),
        );
        let checker = BlackDuckConnectivityChecker::with_backend(Arc::new(backend));

        let result = checker.determine_connectivity(&black_duck_config()).await;

        assert!(!result.is_successfully_connected());
        let reason = result.failure_reason().unwrap();
        assert!(reason.contains("blackduck.example.com"));
        assert!(reason.contains("404"));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_reported() {
        let backend = FakeBackend::new()
            .with_response("/api/tokens/authenticate", CannedResponse::status(401));
        let checker = BlackDuckConnectivityChecker::with_backend(Arc::new(backend));

        let result = checker.determine_connectivity(&black_duck_config()).await;

        assert!(result.failure_reason().unwrap().contains("rejected"));
    }

    #[tokio::test]
    async fn test_polaris_config_is_rejected() {
        let backend = Arc::new(healthy_backend());
        let checker = BlackDuckConnectivityChecker::with_backend(backend.clone());
        let config =
            PolarisServerConfig::new(Url::parse("https://polaris.example.com").unwrap(), "t").into();

        let result = checker.determine_connectivity(&config).await;

        assert!(result.failure_reason().unwrap().contains("Expected a Black Duck"));
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn test_real_backend_is_built_per_server() {
        let checker = BlackDuckConnectivityChecker::new(HttpClientConfig::default());
        let ProductServerConfig::BlackDuck(server) = black_duck_config() else {
            unreachable!()
        };
        assert!(checker.backend_for(&server).is_ok());
    }
}
