//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP clients, property sources, etc.).
//!
//! # Structure
//!
//! - `product` - The products detect can boot (`Product`)
//! - `config` - Per-product server configuration
//! - `decision` - Operator intent and global boot options
//! - `connectivity` - Outcome of a live product connectivity check
//! - `run_data` - Final activation state handed to the run phase
//! - `name_version` - Project identity candidates and decisions
//! - `phone_home` - Opaque phone-home handle created after boot

mod config;
mod connectivity;
mod decision;
pub mod name_version;
mod phone_home;
mod product;
mod run_data;

pub use config::{
    BlackDuckCredentials, BlackDuckServerConfig, DEFAULT_TIMEOUT, PolarisServerConfig,
    ProductServerConfig, ProxyConfig,
};
pub use connectivity::{ConnectivityResult, ProductConnection};
pub use decision::{ProductBootOptions, ProductDecision};
pub use name_version::{DetectorProjectInfo, DetectorType, NameVersion, NameVersionDecision};
pub use phone_home::PhoneHomeManager;
pub use product::Product;
pub use run_data::{ProductRunData, ProductRunState};
