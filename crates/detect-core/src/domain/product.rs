//! The external products detect can report to.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// An external analysis platform detect may boot.
///
/// Variant order is the boot order: Black Duck is always evaluated before
/// Polaris.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Product {
    BlackDuck,
    Polaris,
}

impl Product {
    /// Human-readable product name used in log and error messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BlackDuck => "Black Duck",
            Self::Polaris => "Polaris",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
