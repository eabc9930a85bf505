//! Phone-home handle created once a normal boot succeeds.
//!
//! Boot decisions never look at this value; it is only carried to the run
//! phase inside `ProductRunData`.

use std::collections::BTreeMap;

use tracing::debug;

use super::Product;

/// Opaque phone-home handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneHomeManager {
    products: Vec<Product>,
    detect_version: String,
    metadata: BTreeMap<String, String>,
}

impl PhoneHomeManager {
    pub fn new(products: Vec<Product>, detect_version: impl Into<String>) -> Self {
        Self {
            products,
            detect_version: detect_version.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry reported alongside the phone-home event.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn detect_version(&self) -> &str {
        &self.detect_version
    }

    pub const fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Record the start of a run.
    pub fn start(&self) {
        debug!(
            products = ?self.products,
            detect_version = %self.detect_version,
            metadata = ?self.metadata,
            "Phone home started"
        );
    }
}
