//! Connectivity checker port.
//!
//! One implementation exists per product (see `detect-products`). A checker
//! performs a live reachability and credential check and hands back either a
//! usable connection or a diagnostic message.

use async_trait::async_trait;

use crate::domain::{ConnectivityResult, ProductServerConfig};

/// Port for probing a product server before boot commits to using it.
///
/// Implementations own their timeouts and any retry policy. Ordinary
/// failures (unreachable host, rejected credentials, unexpected responses,
/// a configuration for the wrong product) must be returned as
/// `ConnectivityResult::Failure`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityChecker: Send + Sync {
    async fn determine_connectivity(&self, config: &ProductServerConfig) -> ConnectivityResult;
}
