//! Wire types for the Black Duck and Polaris REST APIs.

use serde::Deserialize;

/// Body of `POST /api/tokens/authenticate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BearerTokenView {
    pub bearer_token: String,
}

/// Body of `GET /api/current-version`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentVersionView {
    pub version: String,
}

/// Body of the analytics integration setting.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationSettingView {
    pub name: String,
    pub value: bool,
}

/// Body of `POST /api/auth/authenticate` on Polaris.
#[derive(Debug, Clone, Deserialize)]
pub struct PolarisAuthView {
    pub jwt: String,
}
