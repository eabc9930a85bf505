//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - Connectivity checkers report failure as a value, never as an error
//! - Everything boot consumes is injected; there is no global registry

pub mod boot_factory;
pub mod connectivity_checker;
pub mod product_client;

pub use boot_factory::ProductBootFactory;
pub use connectivity_checker::ConnectivityChecker;
pub use product_client::{AnalyticsSetting, ProductClient, ProductClientError};

#[cfg(test)]
pub use boot_factory::MockProductBootFactory;
#[cfg(test)]
pub use connectivity_checker::MockConnectivityChecker;
#[cfg(test)]
pub use product_client::MockProductClient;
