//! Black Duck client.
//!
//! Authentication yields a bearer token that every later request carries.
//! API-token logins go through `/api/tokens/authenticate`; username and
//! password logins go through the legacy form endpoint and receive the
//! token as a cookie.

mod checker;

pub use checker::BlackDuckConnectivityChecker;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use detect_core::{
    AnalyticsSetting, BlackDuckCredentials, BlackDuckServerConfig, Product, ProductClient,
    ProductClientError,
};
use tracing::debug;
use url::Url;

use crate::error::{ProductHttpError, ProductHttpResult};
use crate::http::{ApiRequest, HttpBackend, endpoint};
use crate::models::{BearerTokenView, CurrentVersionView, IntegrationSettingView};

const TOKEN_AUTH_PATH: &str = "/api/tokens/authenticate";
const LOGIN_PATH: &str = "/j_spring_security_check";
const CURRENT_VERSION_PATH: &str = "/api/current-version";
const ANALYTICS_SETTING_PATH: &str = "/api/internal/integration-settings/analytics";

const USER_MIME_TYPE: &str = "application/vnd.blackducksoftware.user-4+json";
const INTEGRATION_SETTING_MIME_TYPE: &str =
    "application/vnd.blackducksoftware.integration-setting-1+json";
const JSON_MIME_TYPE: &str = "application/json";

const BEARER_COOKIE: &str = "AUTHORIZATION_BEARER";

/// An authenticated Black Duck session.
pub struct BlackDuckClient {
    backend: Arc<dyn HttpBackend>,
    base_url: Url,
    bearer_token: String,
}

impl fmt::Debug for BlackDuckClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlackDuckClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl BlackDuckClient {
    /// Log in to the server described by `server`.
    pub(crate) async fn authenticate(
        backend: Arc<dyn HttpBackend>,
        server: &BlackDuckServerConfig,
    ) -> ProductHttpResult<Self> {
        let bearer_token = match &server.credentials {
            BlackDuckCredentials::ApiToken(token) => {
                Self::exchange_api_token(backend.as_ref(), &server.url, token).await?
            }
            BlackDuckCredentials::UsernamePassword { username, password } => {
                Self::login(backend.as_ref(), &server.url, username, password).await?
            }
        };
        debug!(url = %server.url, "Authenticated with Black Duck");

        Ok(Self {
            backend,
            base_url: server.url.clone(),
            bearer_token,
        })
    }

    async fn exchange_api_token(
        backend: &dyn HttpBackend,
        base_url: &Url,
        api_token: &str,
    ) -> ProductHttpResult<String> {
        let url = endpoint(base_url, TOKEN_AUTH_PATH)?;
        let request = ApiRequest::post(url.clone())
            .header("Authorization", format!("token {api_token}"))
            .accept(USER_MIME_TYPE);
        let view: BearerTokenView = backend.execute(request).await?.error_for_status(&url)?.json()?;
        Ok(view.bearer_token)
    }

    async fn login(
        backend: &dyn HttpBackend,
        base_url: &Url,
        username: &str,
        password: &str,
    ) -> ProductHttpResult<String> {
        let url = endpoint(base_url, LOGIN_PATH)?;
        let request =
            ApiRequest::post(url.clone()).form(&[("j_username", username), ("j_password", password)]);
        let response = backend.execute(request).await?.error_for_status(&url)?;

        response
            .header_values("Set-Cookie")
            .find_map(bearer_from_cookie)
            .map(str::to_string)
            .ok_or_else(|| ProductHttpError::InvalidResponse {
                message: "Black Duck login did not return a bearer token".to_string(),
            })
    }

    /// `GET /api/current-version`.
    pub async fn current_version(&self) -> ProductHttpResult<CurrentVersionView> {
        let url = endpoint(&self.base_url, CURRENT_VERSION_PATH)?;
        let request = ApiRequest::get(url.clone())
            .accept(JSON_MIME_TYPE)
            .bearer(&self.bearer_token);
        self.backend.execute(request).await?.error_for_status(&url)?.json()
    }

    /// Whether the server permits usage analytics.
    pub async fn fetch_analytics_setting(&self) -> ProductHttpResult<AnalyticsSetting> {
        let url = endpoint(&self.base_url, ANALYTICS_SETTING_PATH)?;
        let request = ApiRequest::get(url.clone())
            .accept(INTEGRATION_SETTING_MIME_TYPE)
            .bearer(&self.bearer_token);
        let view: IntegrationSettingView =
            self.backend.execute(request).await?.error_for_status(&url)?.json()?;
        Ok(AnalyticsSetting {
            name: view.name,
            value: view.value,
        })
    }
}

#[async_trait]
impl ProductClient for BlackDuckClient {
    fn product(&self) -> Product {
        Product::BlackDuck
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn analytics_setting(&self) -> Result<Option<AnalyticsSetting>, ProductClientError> {
        self.fetch_analytics_setting()
            .await
            .map(Some)
            .map_err(|err| err.into_client_error(Product::BlackDuck))
    }
}

/// Value of the `AUTHORIZATION_BEARER` cookie in a `Set-Cookie` header.
fn bearer_from_cookie(header: &str) -> Option<&str> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    (name == BEARER_COOKIE && !value.is_empty()).then_some(value)
}
