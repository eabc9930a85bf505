//! The single fatal, user-facing boot error.

use thiserror::Error;

use crate::domain::Product;

/// Why boot decided no run is possible.
///
/// Adapters map this to their own surface (the CLI maps it to exit codes).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootError {
    /// Every product decision was `Skip`.
    #[error(
        "Your environment was not sufficiently configured to run Black Duck or Polaris. Please configure your environment for at least one product."
    )]
    NoProductRequested,

    /// A requested product failed its connectivity check and failures are not ignored.
    #[error("Could not communicate with {product}: {message}")]
    ConnectivityFailure { product: Product, message: String },

    /// A product failed its connectivity check while only testing connections.
    #[error("Connection test to {product} failed: {message}")]
    TestModeConnectivityFailure { product: Product, message: String },
}

impl BootError {
    /// The product whose connectivity check failed, if the error is a connectivity error.
    #[must_use]
    pub const fn product(&self) -> Option<Product> {
        match self {
            Self::NoProductRequested => None,
            Self::ConnectivityFailure { product, .. }
            | Self::TestModeConnectivityFailure { product, .. } => Some(*product),
        }
    }
}
