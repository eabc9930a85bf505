//! Error types for product HTTP operations.
//!
//! These errors never leave a connectivity checker: checkers turn them into
//! `ConnectivityResult::Failure` messages, and clients map them to the core
//! `ProductClientError` at the port boundary.

use detect_core::{Product, ProductClientError};
use thiserror::Error;

/// Result type alias for product HTTP operations.
pub type ProductHttpResult<T> = Result<T, ProductHttpError>;

/// Errors related to product HTTP operations.
#[derive(Debug, Error)]
pub enum ProductHttpError {
    /// Request failed with an HTTP error status.
    #[error("Request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Credentials were rejected.
    #[error("The server rejected the provided credentials (status {status}): {url}")]
    Unauthorized { status: u16, url: String },

    /// Server returned an invalid or unexpected response.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The checker was handed another product's configuration.
    #[error("Expected a {expected} configuration but received one for {actual}")]
    WrongProduct { expected: Product, actual: Product },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ProductHttpError {
    /// Whether retrying the same request may succeed.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::ApiRequestFailed { status, .. } => *status >= 500,
            Self::Network(_) => true,
            Self::Unauthorized { .. }
            | Self::InvalidResponse { .. }
            | Self::WrongProduct { .. }
            | Self::InvalidUrl(_)
            | Self::JsonParse(_) => false,
        }
    }

    /// Map to the core port error for `product`.
    pub fn into_client_error(self, product: Product) -> ProductClientError {
        match self {
            Self::InvalidResponse { message } => {
                ProductClientError::InvalidResponse { product, message }
            }
            Self::JsonParse(err) => ProductClientError::InvalidResponse {
                product,
                message: err.to_string(),
            },
            other => ProductClientError::Request {
                product,
                message: other.to_string(),
            },
        }
    }
}
