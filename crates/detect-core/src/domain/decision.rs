//! Operator intent per product and global boot policy.

use super::{Product, ProductServerConfig};

/// What the operator asked detect to do with one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductDecision {
    /// Do not use the product; its checker is never invoked.
    Skip,
    /// Use the product without talking to a server (no check, no client).
    RunOffline,
    /// Check the server and use it if reachable.
    RunOnline(ProductServerConfig),
}

impl ProductDecision {
    /// Whether the operator requested the product in any form.
    #[must_use]
    pub const fn should_run(&self) -> bool {
        !matches!(self, Self::Skip)
    }

    /// Whether running the product requires a live connectivity check.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        matches!(self, Self::RunOnline(_))
    }

    /// The configured server, if the decision is online.
    #[must_use]
    pub const fn server_config(&self) -> Option<&ProductServerConfig> {
        match self {
            Self::RunOnline(config) => Some(config),
            Self::Skip | Self::RunOffline => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::RunOffline => "offline",
            Self::RunOnline(_) => "online",
        }
    }

    /// Whether the decision's configuration targets `product`.
    ///
    /// `Skip` and `RunOffline` carry no configuration and always match.
    #[must_use]
    pub fn targets(&self, product: Product) -> bool {
        self.server_config()
            .is_none_or(|config| config.product() == product)
    }
}

/// Global boot policy (`detect.ignore.connection.failures`, `detect.test.connection`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductBootOptions {
    /// Disable a product that fails its connectivity check instead of failing the boot.
    pub ignore_connectivity_failures: bool,
    /// Only validate connectivity; never proceed to the run phase.
    pub test_connections_only: bool,
}

impl ProductBootOptions {
    #[must_use]
    pub const fn new(ignore_connectivity_failures: bool, test_connections_only: bool) -> Self {
        Self {
            ignore_connectivity_failures,
            test_connections_only,
        }
    }
}
