#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    BlackDuckCredentials, BlackDuckServerConfig, ConnectivityResult, DetectorProjectInfo,
    DetectorType, NameVersion, NameVersionDecision, PhoneHomeManager, PolarisServerConfig,
    Product, ProductBootOptions, ProductConnection, ProductDecision, ProductRunData,
    ProductRunState, ProductServerConfig, ProxyConfig,
};
pub use error::BootError;
pub use ports::{
    AnalyticsSetting, ConnectivityChecker, ProductBootFactory, ProductClient, ProductClientError,
};
pub use services::{
    DefaultVersionScheme, PlannedProduct, ProductBoot, ProductBootPlan, ProjectNameVersion,
    ProjectNameVersionDecider, ProjectNameVersionOptions, ProjectNameVersionResolver,
};

// Silence unused dev-dependency warnings for crates only used by integration tests
#[cfg(test)]
use tokio_test as _;
