//! Product boot - decides which products are active for a run.
//!
//! Boot walks an ordered plan of `(product, decision, checker)` entries,
//! probing each online product one after another, and folds the results
//! with the global options into a `ProductRunData`. Adding a product means
//! adding a plan entry; the algorithm below does not change.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    ConnectivityResult, Product, ProductBootOptions, ProductDecision, ProductRunData,
    ProductRunState,
};
use crate::error::BootError;
use crate::ports::{ConnectivityChecker, ProductBootFactory};

/// One product in the boot plan.
#[derive(Clone)]
pub struct PlannedProduct {
    pub product: Product,
    pub decision: ProductDecision,
    pub checker: Arc<dyn ConnectivityChecker>,
}

/// Ordered list of products to boot.
#[derive(Clone, Default)]
pub struct ProductBootPlan {
    entries: Vec<PlannedProduct>,
}

impl ProductBootPlan {
    /// The standard two-product plan: Black Duck first, then Polaris.
    pub fn new(
        black_duck: ProductDecision,
        polaris: ProductDecision,
        black_duck_checker: Arc<dyn ConnectivityChecker>,
        polaris_checker: Arc<dyn ConnectivityChecker>,
    ) -> Self {
        Self::default()
            .with_product(Product::BlackDuck, black_duck, black_duck_checker)
            .with_product(Product::Polaris, polaris, polaris_checker)
    }

    /// Append a product; entries are booted in insertion order.
    #[must_use]
    pub fn with_product(
        mut self,
        product: Product,
        decision: ProductDecision,
        checker: Arc<dyn ConnectivityChecker>,
    ) -> Self {
        self.entries.push(PlannedProduct {
            product,
            decision,
            checker,
        });
        self
    }

    pub fn entries(&self) -> &[PlannedProduct] {
        &self.entries
    }

    /// Whether any entry asks for its product to run.
    pub fn will_run_any(&self) -> bool {
        self.entries.iter().any(|entry| entry.decision.should_run())
    }
}

/// Stateless boot orchestrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductBoot;

impl ProductBoot {
    pub const fn new() -> Self {
        Self
    }

    /// Boot every product in `plan`.
    ///
    /// Returns `Ok(None)` when `test_connections_only` is set and every
    /// requested check passed: the caller should exit cleanly without a run
    /// phase.
    pub async fn boot(
        &self,
        plan: &ProductBootPlan,
        options: ProductBootOptions,
        factory: &dyn ProductBootFactory,
    ) -> Result<Option<ProductRunData>, BootError> {
        if !plan.will_run_any() {
            return Err(BootError::NoProductRequested);
        }

        info!("Detect product boot start.");

        let mut states = Vec::with_capacity(plan.entries().len());
        for entry in plan.entries() {
            let state = Self::boot_product(entry, options).await?;
            states.push((entry.product, state));
        }

        if options.test_connections_only {
            info!("Connection test succeeded; detect will not run.");
            return Ok(None);
        }

        let run_data = ProductRunData::new(states);
        let phone_home = factory.create_phone_home_manager(&run_data).await;

        info!(
            active = ?run_data.active_products(),
            "Detect product boot completed."
        );
        Ok(Some(run_data.with_phone_home(phone_home)))
    }

    async fn boot_product(
        entry: &PlannedProduct,
        options: ProductBootOptions,
    ) -> Result<ProductRunState, BootError> {
        let product = entry.product;
        let config = match &entry.decision {
            ProductDecision::Skip => {
                debug!("{product} will not be used.");
                return Ok(ProductRunState::Inactive);
            }
            ProductDecision::RunOffline => {
                debug!("{product} will run in offline mode.");
                return Ok(ProductRunState::Offline);
            }
            ProductDecision::RunOnline(config) => config,
        };

        debug!(url = %config.url(), "Will boot {product} product.");

        match entry.checker.determine_connectivity(config).await {
            ConnectivityResult::Success(connection) => {
                info!("Connection to {product} was successful.");
                Ok(ProductRunState::Online(connection))
            }
            ConnectivityResult::Failure { message } => {
                if options.test_connections_only {
                    return Err(BootError::TestModeConnectivityFailure { product, message });
                }
                if options.ignore_connectivity_failures {
                    warn!("Failed to connect to {product}: {message}");
                    warn!(
                        "detect.ignore.connection.failures is set to 'true' so {product} will be disabled."
                    );
                    return Ok(ProductRunState::Inactive);
                }
                Err(BootError::ConnectivityFailure { product, message })
            }
        }
    }
}
