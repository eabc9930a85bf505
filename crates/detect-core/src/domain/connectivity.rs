//! Outcome of a live product connectivity check.

use std::fmt;
use std::sync::Arc;

use super::{Product, ProductServerConfig};
use crate::ports::ProductClient;

/// A verified connection to a product: the reusable client handle plus the
/// server configuration it was built from.
#[derive(Clone)]
pub struct ProductConnection {
    pub client: Arc<dyn ProductClient>,
    pub server: ProductServerConfig,
}

impl ProductConnection {
    pub fn new(client: Arc<dyn ProductClient>, server: ProductServerConfig) -> Self {
        Self { client, server }
    }

    #[must_use]
    pub const fn product(&self) -> Product {
        self.server.product()
    }
}

impl fmt::Debug for ProductConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductConnection")
            .field("product", &self.client.product())
            .field("base_url", &self.client.base_url().as_str())
            .field("server", &self.server)
            .finish()
    }
}

/// Result of `ConnectivityChecker::determine_connectivity`.
///
/// Ordinary connectivity problems (unreachable host, bad credentials,
/// unexpected responses) are reported as `Failure`, never as an error.
#[derive(Debug, Clone)]
pub enum ConnectivityResult {
    Success(ProductConnection),
    Failure { message: String },
}

impl ConnectivityResult {
    pub fn success(client: Arc<dyn ProductClient>, server: ProductServerConfig) -> Self {
        Self::Success(ProductConnection::new(client, server))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_successfully_connected(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Diagnostic message of a failed check.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { message } => Some(message),
        }
    }
}
