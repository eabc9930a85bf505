//! Final project name/version: operator overrides, detector decision, defaults.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::ProjectNameVersionDecider;
use crate::domain::{DetectorProjectInfo, DetectorType, NameVersion, NameVersionDecision};

/// Default project version text (`detect.default.project.version.text`).
pub const DEFAULT_PROJECT_VERSION_TEXT: &str = "Default Detect Version";

/// Default timestamp format (`detect.default.project.version.timeformat`).
pub const DEFAULT_PROJECT_VERSION_TIMEFORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// How to invent a version when neither the operator nor a detector gave one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultVersionScheme {
    /// Fixed text.
    Text(String),
    /// Current UTC time rendered with a chrono format string.
    Timestamp(String),
}

impl Default for DefaultVersionScheme {
    fn default() -> Self {
        Self::Text(DEFAULT_PROJECT_VERSION_TEXT.to_string())
    }
}

impl DefaultVersionScheme {
    fn render(&self, now: DateTime<Utc>) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Timestamp(format) => {
                let mut rendered = String::new();
                if write!(rendered, "{}", now.format(format)).is_err() {
                    warn!(format = %format, "Invalid default version time format; using default text.");
                    return DEFAULT_PROJECT_VERSION_TEXT.to_string();
                }
                rendered
            }
        }
    }
}

/// Inputs that shape the project identity besides detector candidates.
#[derive(Debug, Clone, Default)]
pub struct ProjectNameVersionOptions {
    /// `detect.project.name`
    pub project_name: Option<String>,
    /// `detect.project.version.name`
    pub project_version: Option<String>,
    /// `detect.project.detector`
    pub preferred_detector: Option<DetectorType>,
    /// Name used when nothing else supplies one (last segment of the source path).
    pub source_dir_name: String,
    pub default_version: DefaultVersionScheme,
}

/// The identity detect will report, with the decision behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNameVersion {
    pub name: String,
    pub version: String,
    pub decision: NameVersionDecision,
}

/// Applies overrides and defaults around `ProjectNameVersionDecider`.
#[derive(Debug, Clone, Default)]
pub struct ProjectNameVersionResolver {
    options: ProjectNameVersionOptions,
    decider: ProjectNameVersionDecider,
}

impl ProjectNameVersionResolver {
    pub fn new(options: ProjectNameVersionOptions) -> Self {
        Self {
            options,
            decider: ProjectNameVersionDecider::new(),
        }
    }

    pub fn resolve(&self, candidates: &[DetectorProjectInfo]) -> ProjectNameVersion {
        self.resolve_at(candidates, Utc::now())
    }

    /// Resolve with an explicit clock for the timestamp version scheme.
    pub fn resolve_at(
        &self,
        candidates: &[DetectorProjectInfo],
        now: DateTime<Utc>,
    ) -> ProjectNameVersion {
        let options = &self.options;

        if let (Some(name), Some(version)) = (&options.project_name, &options.project_version) {
            let decision =
                NameVersionDecision::ExplicitOverride(NameVersion::new(name.clone(), version.clone()));
            debug!("{}", decision.describe());
            return ProjectNameVersion {
                name: name.clone(),
                version: version.clone(),
                decision,
            };
        }

        let decision = self.decider.decide(candidates, options.preferred_detector);
        let chosen = decision.chosen_name_version();

        let name = options
            .project_name
            .clone()
            .or_else(|| chosen.map(|nv| nv.name.clone()))
            .unwrap_or_else(|| options.source_dir_name.clone());
        let version = options
            .project_version
            .clone()
            .or_else(|| chosen.and_then(|nv| nv.version.clone()))
            .unwrap_or_else(|| options.default_version.render(now));

        info!(project = %name, version = %version, "Project name and version resolved.");
        ProjectNameVersion {
            name,
            version,
            decision,
        }
    }
}
