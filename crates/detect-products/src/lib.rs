#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod blackduck;
mod config;
mod error;
mod http;
mod models;
mod polaris;

// ============================================================================
// Public API
// ============================================================================

// Checkers and clients
pub use blackduck::{BlackDuckClient, BlackDuckConnectivityChecker};
pub use polaris::{PolarisClient, PolarisConnectivityChecker};

// Configuration
pub use config::HttpClientConfig;

// Errors
pub use error::{ProductHttpError, ProductHttpResult};

// Wire types callers may inspect
pub use models::CurrentVersionView;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
