//! Product client port.
//!
//! A successful check yields a client handle the run phase reuses. The core
//! only needs to know which product it talks to and, for phone-home, whether
//! the server allows analytics.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::domain::Product;

/// Errors surfaced by product clients after boot.
#[derive(Debug, Error)]
pub enum ProductClientError {
    /// The request could not be completed.
    #[error("Request to {product} failed: {message}")]
    Request { product: Product, message: String },

    /// The server answered with something the client could not interpret.
    #[error("Unexpected response from {product}: {message}")]
    InvalidResponse { product: Product, message: String },
}

/// A server-side integration setting (e.g. whether analytics are enabled).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSetting {
    pub name: String,
    pub value: bool,
}

/// Handle to a connected product.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductClient: Send + Sync {
    fn product(&self) -> Product;

    fn base_url(&self) -> &Url;

    /// Server analytics setting, for products that expose one.
    async fn analytics_setting(&self) -> Result<Option<AnalyticsSetting>, ProductClientError> {
        Ok(None)
    }
}
