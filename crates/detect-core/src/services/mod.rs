//! Core services: boot orchestration and project identity resolution.
//!
//! Services depend only on ports and domain types; every collaborator is
//! passed in by the composition root.

mod name_version_decider;
mod name_version_resolver;
mod product_boot;

pub use name_version_decider::ProjectNameVersionDecider;
pub use name_version_resolver::{
    DEFAULT_PROJECT_VERSION_TEXT, DEFAULT_PROJECT_VERSION_TIMEFORMAT, DefaultVersionScheme,
    ProjectNameVersion, ProjectNameVersionOptions, ProjectNameVersionResolver,
};
pub use product_boot::{PlannedProduct, ProductBoot, ProductBootPlan};
