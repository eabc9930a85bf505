//! CLI-specific error types and mappings.
//!
//! Boot and configuration failures map to detect's exit codes here.

use std::path::PathBuf;

use detect_core::{BootError, Product};
use thiserror::Error;

/// Invalid or incomplete product properties.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid URL for {property}: '{value}' ({source})")]
    InvalidUrl {
        property: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error(
        "A Black Duck URL was provided without credentials: set blackduck.api.token or blackduck.username and blackduck.password"
    )]
    MissingBlackDuckCredentials,

    #[error("A Polaris URL was provided without polaris.access.token")]
    MissingPolarisAccessToken,

    #[error("blackduck.proxy.host and blackduck.proxy.port must be provided together")]
    IncompleteProxy,
}

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Boot(#[from] BootError),

    /// The detector results file could not be read.
    #[error("Could not read detector results from {}: {source}", path.display())]
    DetectorResultsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The detector results file is not a JSON list of candidates.
    #[error("Invalid detector results in {}: {source}", path.display())]
    DetectorResultsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CliError {
    /// Map error to detect's exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Boot(BootError::NoProductRequested) => 7, // FAILURE_CONFIGURATION
            Self::Boot(
                BootError::ConnectivityFailure { product, .. }
                | BootError::TestModeConnectivityFailure { product, .. },
            ) => match product {
                Product::BlackDuck => 1, // FAILURE_BLACKDUCK_CONNECTIVITY
                Product::Polaris => 12,  // FAILURE_POLARIS_CONNECTIVITY
            },
            Self::DetectorResultsIo { .. } | Self::DetectorResultsFormat { .. } => 99, // FAILURE_GENERAL_ERROR
        }
    }
}
