//! Factory for side-channel objects created during boot.

use async_trait::async_trait;

use crate::domain::{PhoneHomeManager, ProductRunData};

/// Creates the collaborators boot hands to the run phase alongside the
/// product decisions.
///
/// Invoked once per successful, non-test boot. The returned handle is stored
/// in the run data but never influences which products are active.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductBootFactory: Send + Sync {
    async fn create_phone_home_manager(&self, run_data: &ProductRunData) -> Option<PhoneHomeManager>;
}
