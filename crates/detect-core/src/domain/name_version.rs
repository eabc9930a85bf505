//! Project identity candidates and the decision over which one wins.
//!
//! Detectors each report a [`DetectorProjectInfo`]; the decider in
//! `services` reduces them to one [`NameVersionDecision`]. Decisions are a
//! closed tagged union: every variant knows its chosen identity (if any) and
//! renders its own rationale through [`NameVersionDecision::describe`].

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A project name with an optional version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NameVersion {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl NameVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }
}

impl fmt::Display for NameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}

/// Identity of the detector that produced a candidate.
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
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DetectorType {
    Bitbake,
    Cargo,
    Carthage,
    Clang,
    Cocoapods,
    Conda,
    Cpan,
    Cran,
    Git,
    GoMod,
    GoDep,
    GoVndr,
    GoVendor,
    GoGradle,
    Gradle,
    Hex,
    Lerna,
    Maven,
    Npm,
    Nuget,
    Packagist,
    Pear,
    Pip,
    Rubygems,
    Sbt,
    Swift,
    Yarn,
}

/// One candidate project identity reported by a detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorProjectInfo {
    pub detector_type: DetectorType,
    /// Directory nesting at which the detector applied; lower wins.
    pub depth: u32,
    pub name_version: NameVersion,
}

impl DetectorProjectInfo {
    pub const fn new(detector_type: DetectorType, depth: u32, name_version: NameVersion) -> Self {
        Self {
            detector_type,
            depth,
            name_version,
        }
    }
}

/// The resolved project identity together with why it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameVersionDecision {
    /// The operator supplied both name and version; detectors were not consulted.
    ExplicitOverride(NameVersion),
    /// Exactly one candidate of the preferred detector type at the lowest depth.
    PreferredDetector(DetectorProjectInfo),
    /// No candidate of the preferred detector type was found.
    PreferredDetectorNotFound { detector_type: DetectorType },
    /// Several candidates of the preferred detector type tie at the lowest depth.
    TooManyPreferredDetectorTypesFound { detector_type: DetectorType },
    /// Exactly one detector type appeared once at the lowest depth.
    UniqueDetector(DetectorProjectInfo),
    /// No detector type appeared exactly once at the lowest depth.
    UniqueDetectorNotFound,
    /// Several unique candidates; one was picked deterministically.
    Arbitrary {
        chosen: DetectorProjectInfo,
        other_choices: Vec<DetectorProjectInfo>,
    },
}

impl NameVersionDecision {
    /// The identity this decision settled on, if any.
    pub const fn chosen_name_version(&self) -> Option<&NameVersion> {
        match self {
            Self::ExplicitOverride(name_version) => Some(name_version),
            Self::PreferredDetector(info)
            | Self::UniqueDetector(info)
            | Self::Arbitrary { chosen: info, .. } => Some(&info.name_version),
            Self::PreferredDetectorNotFound { .. }
            | Self::TooManyPreferredDetectorTypesFound { .. }
            | Self::UniqueDetectorNotFound => None,
        }
    }

    /// The winning detector candidate, if a detector decided.
    pub const fn chosen_detector(&self) -> Option<&DetectorProjectInfo> {
        match self {
            Self::PreferredDetector(info)
            | Self::UniqueDetector(info)
            | Self::Arbitrary { chosen: info, .. } => Some(info),
            Self::ExplicitOverride(_)
            | Self::PreferredDetectorNotFound { .. }
            | Self::TooManyPreferredDetectorTypesFound { .. }
            | Self::UniqueDetectorNotFound => None,
        }
    }

    /// Human-readable rationale for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::ExplicitOverride(name_version) => {
                format!("Using the provided project name and version: {name_version}.")
            }
            Self::PreferredDetector(info) => format!(
                "Using preferred bom tool project info from {} found at depth {} as project info.",
                info.detector_type, info.depth
            ),
            Self::PreferredDetectorNotFound { detector_type } => format!(
                "A bom tool of type {detector_type} was not found. Project info could not be found in a bom tool."
            ),
            Self::TooManyPreferredDetectorTypesFound { detector_type } => format!(
                "More than one preferred bom tool of type {detector_type} was found. Project info could not be found in a bom tool."
            ),
            Self::UniqueDetector(info) => format!(
                "Bom tool project info from {} found at depth {} was the only unique project info.",
                info.detector_type, info.depth
            ),
            Self::UniqueDetectorNotFound => {
                "No unique bom tool was found. Project info could not be found in a bom tool."
                    .to_string()
            }
            Self::Arbitrary {
                chosen,
                other_choices,
            } => {
                let others = other_choices
                    .iter()
                    .map(|info| format!("{} ({})", info.name_version, info.detector_type))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Multiple unique bom tool types were found. Chose {} from {} at depth {} over: {}.",
                    chosen.name_version, chosen.detector_type, chosen.depth, others
                )
            }
        }
    }
}
