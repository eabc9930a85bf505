//! Turns product properties into one `ProductDecision` per product.

use std::time::Duration;

use detect_core::{
    BlackDuckCredentials, BlackDuckServerConfig, PolarisServerConfig, ProductBootOptions,
    ProductDecision, ProxyConfig,
};
use tracing::debug;
use url::Url;

use crate::error::ConfigError;
use crate::parser::{BlackDuckArgs, BootArgs, PolarisArgs};

/// Decides from properties whether each product should run, and how.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductDecider;

impl ProductDecider {
    /// Offline mode wins over a URL; a URL requires credentials.
    pub fn decide_black_duck(&self, args: &BlackDuckArgs) -> Result<ProductDecision, ConfigError> {
        if args.offline_mode {
            debug!("Black Duck will run in offline mode.");
            return Ok(ProductDecision::RunOffline);
        }
        let Some(raw_url) = non_empty(args.url.as_deref()) else {
            debug!("No Black Duck URL was provided; Black Duck will not run.");
            return Ok(ProductDecision::Skip);
        };

        let url = parse_url("blackduck.url", raw_url)?;
        let credentials = match (
            non_empty(args.api_token.as_deref()),
            non_empty(args.username.as_deref()),
            non_empty(args.password.as_deref()),
        ) {
            (Some(token), _, _) => BlackDuckCredentials::ApiToken(token.to_string()),
            (None, Some(username), Some(password)) => BlackDuckCredentials::UsernamePassword {
                username: username.to_string(),
                password: password.to_string(),
            },
            _ => return Err(ConfigError::MissingBlackDuckCredentials),
        };

        let config = BlackDuckServerConfig::new(url, credentials)
            .with_timeout(Duration::from_secs(args.timeout))
            .with_trust_cert(args.trust_cert)
            .with_proxy(proxy(args)?);
        debug!("Black Duck will run online.");
        Ok(ProductDecision::RunOnline(config.into()))
    }

    pub fn decide_polaris(&self, args: &PolarisArgs) -> Result<ProductDecision, ConfigError> {
        let Some(raw_url) = non_empty(args.url.as_deref()) else {
            debug!("No Polaris URL was provided; Polaris will not run.");
            return Ok(ProductDecision::Skip);
        };
        let url = parse_url("polaris.url", raw_url)?;
        let token =
            non_empty(args.access_token.as_deref()).ok_or(ConfigError::MissingPolarisAccessToken)?;

        let config = PolarisServerConfig::new(url, token)
            .with_timeout(Duration::from_secs(args.timeout));
        debug!("Polaris will run online.");
        Ok(ProductDecision::RunOnline(config.into()))
    }

    pub const fn boot_options(&self, args: &BootArgs) -> ProductBootOptions {
        ProductBootOptions::new(args.ignore_connection_failures, args.test_connection)
    }
}

/// Blank property values count as unset.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_url(property: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        property,
        value: value.to_string(),
        source,
    })
}

fn proxy(args: &BlackDuckArgs) -> Result<Option<ProxyConfig>, ConfigError> {
    match (non_empty(args.proxy_host.as_deref()), args.proxy_port) {
        (None, None) => Ok(None),
        (Some(host), Some(port)) => Ok(Some(ProxyConfig {
            host: host.to_string(),
            port,
            username: args.proxy_username.clone(),
            password: args.proxy_password.clone(),
        })),
        _ => Err(ConfigError::IncompleteProxy),
    }
}
