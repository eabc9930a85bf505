//! Boot and project identity for one detect invocation.

use std::path::{Path, PathBuf};

use detect_core::{
    DefaultVersionScheme, DetectorProjectInfo, ProductBoot, ProductRunData, ProductRunState,
    ProjectNameVersion, ProjectNameVersionOptions, ProjectNameVersionResolver,
};
use tracing::{debug, info};

use crate::bootstrap::BootContext;
use crate::decider::non_empty;
use crate::error::CliError;
use crate::parser::{ProjectArgs, VersionSchemeArg};

/// What a successful invocation did.
#[derive(Debug)]
pub enum RunOutcome {
    /// `detect.test.connection` was set and every requested product answered.
    ConnectionTestSucceeded,
    /// Boot completed and the project identity was resolved.
    Completed {
        run_data: ProductRunData,
        project: ProjectNameVersion,
    },
}

/// Boot the products, then resolve the project name and version.
pub async fn run(context: &BootContext, project: &ProjectArgs) -> Result<RunOutcome, CliError> {
    info!("Detect boot begin");
    let boot = ProductBoot::new()
        .boot(&context.plan, context.options, &context.factory)
        .await?;

    let Some(run_data) = boot else {
        info!("Connection test succeeded.");
        return Ok(RunOutcome::ConnectionTestSucceeded);
    };

    if let Some(phone_home) = run_data.phone_home() {
        phone_home.start();
    }

    let candidates = match &project.detector_results {
        Some(path) => load_candidates(path)?,
        None => Vec::new(),
    };
    let resolved = ProjectNameVersionResolver::new(name_version_options(project)).resolve(&candidates);

    for line in summary(&run_data, &resolved) {
        info!("{line}");
    }
    Ok(RunOutcome::Completed {
        run_data,
        project: resolved,
    })
}

/// Read detector project info candidates from a JSON array file.
pub fn load_candidates(path: &Path) -> Result<Vec<DetectorProjectInfo>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::DetectorResultsIo {
        path: path.to_path_buf(),
        source,
    })?;
    let candidates: Vec<DetectorProjectInfo> =
        serde_json::from_str(&content).map_err(|source| CliError::DetectorResultsFormat {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(count = candidates.len(), path = %path.display(), "Loaded detector results");
    Ok(candidates)
}

pub fn name_version_options(project: &ProjectArgs) -> ProjectNameVersionOptions {
    let default_version = match project.default_version_scheme {
        VersionSchemeArg::Text => DefaultVersionScheme::Text(project.default_version_text.clone()),
        VersionSchemeArg::Timestamp => {
            DefaultVersionScheme::Timestamp(project.default_version_timeformat.clone())
        }
    };
    ProjectNameVersionOptions {
        project_name: non_empty(project.name.as_deref()).map(str::to_string),
        project_version: non_empty(project.version.as_deref()).map(str::to_string),
        preferred_detector: project.detector,
        source_dir_name: source_dir_name(project.source_path.as_deref()),
        default_version,
    }
}

/// Last path segment of the scanned directory.
fn source_dir_name(source_path: Option<&Path>) -> String {
    let path = source_path.map_or_else(
        || std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        Path::to_path_buf,
    );
    let path = std::fs::canonicalize(&path).unwrap_or(path);
    path.file_name()
        .map_or_else(|| "unknown".to_string(), |name| name.to_string_lossy().into_owned())
}

/// Human-readable lines describing the run.
pub fn summary(run_data: &ProductRunData, project: &ProjectNameVersion) -> Vec<String> {
    let mut lines: Vec<String> = run_data
        .states()
        .iter()
        .map(|(product, state)| match state {
            ProductRunState::Online(connection) => {
                format!("{product}: online ({})", connection.server.url())
            }
            ProductRunState::Offline => format!("{product}: offline"),
            ProductRunState::Inactive => format!("{product}: not used"),
        })
        .collect();
    lines.push(project.decision.describe());
    lines.push(format!("Project: {} / {}", project.name, project.version));
    lines
}
