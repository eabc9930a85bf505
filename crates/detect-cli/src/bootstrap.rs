//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Product decisions (via `ProductDecider`)
//! - Connectivity checkers (via detect-products)
//! - The phone-home factory handed to `ProductBoot`

use std::sync::Arc;

use async_trait::async_trait;
use detect_core::{
    ConnectivityChecker, PhoneHomeManager, Product, ProductBootFactory, ProductBootOptions,
    ProductBootPlan, ProductRunData, ProductRunState,
};
use detect_products::{BlackDuckConnectivityChecker, HttpClientConfig, PolarisConnectivityChecker};
use tracing::{debug, warn};

use crate::decider::ProductDecider;
use crate::error::CliError;
use crate::parser::Cli;

/// Version reported by phone-home.
pub const DETECT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the phone-home handle once boot has produced run data.
#[derive(Debug, Clone)]
pub struct DefaultProductBootFactory {
    phone_home_disabled: bool,
    detect_version: String,
}

impl DefaultProductBootFactory {
    pub fn new(phone_home_disabled: bool, detect_version: impl Into<String>) -> Self {
        Self {
            phone_home_disabled,
            detect_version: detect_version.into(),
        }
    }

    /// Whether Black Duck, when online, allows analytics.
    async fn black_duck_allows_analytics(run_data: &ProductRunData) -> bool {
        let Some(connection) = run_data.connection(Product::BlackDuck) else {
            return true;
        };
        match connection.client.analytics_setting().await {
            Ok(Some(setting)) => setting.value,
            Ok(None) => true,
            Err(err) => {
                warn!(error = %err, "Unable to determine the Black Duck analytics setting; phone home remains enabled.");
                true
            }
        }
    }
}

#[async_trait]
impl ProductBootFactory for DefaultProductBootFactory {
    async fn create_phone_home_manager(&self, run_data: &ProductRunData) -> Option<PhoneHomeManager> {
        if self.phone_home_disabled {
            debug!("Phone home is disabled.");
            return None;
        }
        if !Self::black_duck_allows_analytics(run_data).await {
            debug!("Black Duck analytics are disabled; phone home will not run.");
            return None;
        }

        let mut manager = PhoneHomeManager::new(run_data.active_products(), &self.detect_version);
        for (product, state) in run_data.states() {
            match state {
                ProductRunState::Online(connection) => {
                    manager = manager.with_metadata(
                        format!("{}.url", product.as_ref()),
                        connection.server.url().as_str(),
                    );
                }
                ProductRunState::Offline => {
                    manager = manager.with_metadata(format!("{}.mode", product.as_ref()), "offline");
                }
                ProductRunState::Inactive => {}
            }
        }
        Some(manager)
    }
}

/// Everything `ProductBoot::boot` needs, composed from the command line.
pub struct BootContext {
    pub plan: ProductBootPlan,
    pub options: ProductBootOptions,
    pub factory: DefaultProductBootFactory,
}

/// Bootstrap with the production connectivity checkers.
pub fn bootstrap(cli: &Cli) -> Result<BootContext, CliError> {
    let http = HttpClientConfig::new();
    bootstrap_with_checkers(
        cli,
        Arc::new(BlackDuckConnectivityChecker::new(http.clone())),
        Arc::new(PolarisConnectivityChecker::new(http)),
    )
}

/// Bootstrap with caller-supplied checkers.
pub fn bootstrap_with_checkers(
    cli: &Cli,
    black_duck_checker: Arc<dyn ConnectivityChecker>,
    polaris_checker: Arc<dyn ConnectivityChecker>,
) -> Result<BootContext, CliError> {
    let decider = ProductDecider;
    let black_duck = decider.decide_black_duck(&cli.black_duck)?;
    let polaris = decider.decide_polaris(&cli.polaris)?;
    debug!(
        black_duck = black_duck.label(),
        polaris = polaris.label(),
        "Product decisions made"
    );

    Ok(BootContext {
        plan: ProductBootPlan::new(black_duck, polaris, black_duck_checker, polaris_checker),
        options: decider.boot_options(&cli.boot),
        factory: DefaultProductBootFactory::new(cli.boot.phone_home_disabled, DETECT_VERSION),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use detect_core::{
        AnalyticsSetting, PolarisServerConfig, ProductClient, ProductClientError,
        ProductConnection, ProductServerConfig,
    };
    use url::Url;

    enum Analytics {
        Enabled,
        Disabled,
        Unavailable,
    }

    struct FakeBlackDuck {
        url: Url,
        analytics: Analytics,
    }

    #[async_trait]
    impl ProductClient for FakeBlackDuck {
        fn product(&self) -> Product {
            Product::BlackDuck
        }

        fn base_url(&self) -> &Url {
            &self.url
        }

        async fn analytics_setting(&self) -> Result<Option<AnalyticsSetting>, ProductClientError> {
            match self.analytics {
                Analytics::Enabled => Ok(Some(AnalyticsSetting {
                    name: "analytics".to_string(),
                    value: true,
                })),
                Analytics::Disabled => Ok(Some(AnalyticsSetting {
                    name: "analytics".to_string(),
                    value: false,
                })),
                Analytics::Unavailable => Err(ProductClientError::Request {
                    product: Product::BlackDuck,
                    message: "403".to_string(),
                }),
            }
        }
    }

    fn online_black_duck(analytics: Analytics) -> ProductRunData {
        let url = Url::parse("https://blackduck.example.com").unwrap();
        let server = detect_core::BlackDuckServerConfig::new(
            url.clone(),
            detect_core::BlackDuckCredentials::ApiToken("t".to_string()),
        );
        let connection = ProductConnection::new(
            Arc::new(FakeBlackDuck { url, analytics }),
            server.into(),
        );
        ProductRunData::new(vec![
            (Product::BlackDuck, ProductRunState::Online(connection)),
            (Product::Polaris, ProductRunState::Inactive),
        ])
    }

    #[test]
    fn test_disabled_factory_creates_nothing() {
        let factory = DefaultProductBootFactory::new(true, "6.4.0");
        let run_data = online_black_duck(Analytics::Enabled);
        assert!(tokio_test::block_on(factory.create_phone_home_manager(&run_data)).is_none());
    }

    #[test]
    fn test_analytics_enabled_creates_manager() {
        let factory = DefaultProductBootFactory::new(false, "6.4.0");
        let run_data = online_black_duck(Analytics::Enabled);

        let manager = tokio_test::block_on(factory.create_phone_home_manager(&run_data)).unwrap();

        assert_eq!(manager.products(), &[Product::BlackDuck]);
        assert_eq!(manager.detect_version(), "6.4.0");
        assert_eq!(
            manager.metadata().get("blackduck.url").map(String::as_str),
            Some("https://blackduck.example.com/")
        );
    }

    #[test]
    fn test_analytics_disabled_creates_nothing() {
        let factory = DefaultProductBootFactory::new(false, "6.4.0");
        let run_data = online_black_duck(Analytics::Disabled);
        assert!(tokio_test::block_on(factory.create_phone_home_manager(&run_data)).is_none());
    }

    #[test]
    fn test_analytics_failure_still_creates_manager() {
        let factory = DefaultProductBootFactory::new(false, "6.4.0");
        let run_data = online_black_duck(Analytics::Unavailable);
        assert!(tokio_test::block_on(factory.create_phone_home_manager(&run_data)).is_some());
    }

    #[test]
    fn test_offline_black_duck_is_recorded() {
        let factory = DefaultProductBootFactory::new(false, "6.4.0");
        let run_data = ProductRunData::new(vec![
            (Product::BlackDuck, ProductRunState::Offline),
            (Product::Polaris, ProductRunState::Inactive),
        ]);

        let manager = tokio_test::block_on(factory.create_phone_home_manager(&run_data)).unwrap();

        assert_eq!(
            manager.metadata().get("blackduck.mode").map(String::as_str),
            Some("offline")
        );
    }

    #[test]
    fn test_bootstrap_builds_plan_from_properties() {
        let cli = Cli::try_parse_isolated([
            "detect",
            "--polaris.url=https://polaris.example.com",
            "--polaris.access.token=token",
            "--detect.test.connection",
        ])
        .unwrap();

        let context = bootstrap(&cli).unwrap();

        let entries = context.plan.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].product, Product::BlackDuck);
        assert!(!entries[0].decision.should_run());
        let expected: ProductServerConfig =
            PolarisServerConfig::new(Url::parse("https://polaris.example.com").unwrap(), "token")
                .into();
        assert_eq!(entries[1].decision.server_config(), Some(&expected));
        assert!(context.options.test_connections_only);
    }

    #[test]
    fn test_bootstrap_surfaces_config_errors() {
        let cli =
            Cli::try_parse_isolated(["detect", "--polaris.url=https://polaris.example.com"]).unwrap();
        let result = bootstrap(&cli);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
