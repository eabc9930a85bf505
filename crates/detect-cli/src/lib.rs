#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

// Used by the `detect` binary only
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod decider;
pub mod error;
pub mod parser;
pub mod run;

// Re-export primary types for convenient access
pub use bootstrap::{BootContext, DefaultProductBootFactory, bootstrap, bootstrap_with_checkers};
pub use decider::ProductDecider;
pub use error::{CliError, ConfigError};
pub use parser::Cli;
pub use run::{RunOutcome, run};
