//! End-to-end runs of the CLI flow with scripted connectivity checkers.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use clap::{CommandFactory, FromArgMatches};
use detect_cli::{Cli, CliError, RunOutcome, bootstrap_with_checkers, run};
use detect_core::{
    ConnectivityChecker, ConnectivityResult, NameVersionDecision, Product, ProductClient,
    ProductServerConfig,
};
use url::Url;

struct StubClient {
    product: Product,
    url: Url,
}

#[async_trait]
impl ProductClient for StubClient {
    fn product(&self) -> Product {
        self.product
    }

    fn base_url(&self) -> &Url {
        &self.url
    }
}

struct ScriptedChecker {
    reachable: bool,
    calls: AtomicUsize,
}

impl ScriptedChecker {
    fn new(reachable: bool) -> Arc<Self> {
        Arc::new(Self {
            reachable,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ConnectivityChecker for ScriptedChecker {
    async fn determine_connectivity(&self, config: &ProductServerConfig) -> ConnectivityResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reachable {
            ConnectivityResult::success(
                Arc::new(StubClient {
                    product: config.product(),
                    url: config.url().clone(),
                }),
                config.clone(),
            )
        } else {
            ConnectivityResult::failure("connection refused")
        }
    }
}

fn execute(
    args: &[&str],
    black_duck: Arc<ScriptedChecker>,
    polaris: Arc<ScriptedChecker>,
) -> Result<RunOutcome, CliError> {
    let mut argv = vec!["detect"];
    argv.extend_from_slice(args);
    // Arguments alone; environment fallbacks are stripped.
    let matches = Cli::command()
        .mut_args(|arg| arg.env(None::<&'static str>))
        .try_get_matches_from(argv)
        .unwrap();
    let cli = Cli::from_arg_matches(&matches).unwrap();
    let context = bootstrap_with_checkers(&cli, black_duck, polaris)?;
    tokio_test::block_on(run(&context, &cli.project))
}

#[test]
fn test_nothing_requested_exits_with_configuration_code() {
    let err = execute(&[], ScriptedChecker::new(true), ScriptedChecker::new(true)).unwrap_err();
    assert!(matches!(err, CliError::Boot(detect_core::BootError::NoProductRequested)));
    assert_eq!(err.exit_code(), 7);
}

#[test]
fn test_connection_test_mode() {
    let polaris = ScriptedChecker::new(true);
    let outcome = execute(
        &[
            "--polaris.url=https://polaris.example.com",
            "--polaris.access.token=token",
            "--detect.test.connection",
        ],
        ScriptedChecker::new(true),
        polaris.clone(),
    )
    .unwrap();

    assert!(matches!(outcome, RunOutcome::ConnectionTestSucceeded));
    assert_eq!(polaris.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_black_duck_failure_exit_code() {
    let err = execute(
        &[
            "--blackduck.url=https://blackduck.example.com",
            "--blackduck.api.token=token",
        ],
        ScriptedChecker::new(false),
        ScriptedChecker::new(true),
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_ignored_failure_still_completes() {
    let outcome = execute(
        &[
            "--polaris.url=https://polaris.example.com",
            "--polaris.access.token=token",
            "--detect.ignore.connection.failures",
            "--detect.project.name=app",
            "--detect.project.version.name=2.0",
        ],
        ScriptedChecker::new(true),
        ScriptedChecker::new(false),
    )
    .unwrap();

    let RunOutcome::Completed { run_data, project } = outcome else {
        panic!("expected a completed run");
    };
    assert!(!run_data.should_use_polaris());
    assert_eq!(project.name, "app");
    assert_eq!(project.version, "2.0");
    assert!(matches!(project.decision, NameVersionDecision::ExplicitOverride(_)));
}

#[test]
fn test_offline_black_duck_resolves_project_from_detectors() {
    let mut results = tempfile::NamedTempFile::new().unwrap();
    write!(
        results,
        r#"[
            {{"detector_type": "NPM", "depth": 1, "name_version": {{"name": "nested", "version": "0.1"}}}},
            {{"detector_type": "MAVEN", "depth": 0, "name_version": {{"name": "app", "version": "1.0"}}}}
        ]"#
    )
    .unwrap();
    let results_arg = format!("--detect.detector.results={}", results.path().display());
    let black_duck = ScriptedChecker::new(false);

    let outcome = execute(
        &["--blackduck.offline.mode", results_arg.as_str()],
        black_duck.clone(),
        ScriptedChecker::new(false),
    )
    .unwrap();

    let RunOutcome::Completed { run_data, project } = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(black_duck.calls.load(Ordering::SeqCst), 0);
    assert!(run_data.should_use_black_duck());
    assert!(!run_data.is_online(Product::BlackDuck));
    assert!(run_data.phone_home().is_some());
    assert_eq!((project.name.as_str(), project.version.as_str()), ("app", "1.0"));
    assert!(matches!(project.decision, NameVersionDecision::UniqueDetector(_)));
}

#[test]
fn test_blank_project_name_uses_detector_candidate() {
    let mut results = tempfile::NamedTempFile::new().unwrap();
    write!(
        results,
        r#"[{{"detector_type": "MAVEN", "depth": 0, "name_version": {{"name": "app", "version": "1.0"}}}}]"#
    )
    .unwrap();
    let results_arg = format!("--detect.detector.results={}", results.path().display());

    let outcome = execute(
        &[
            "--blackduck.offline.mode",
            "--detect.project.name=",
            results_arg.as_str(),
        ],
        ScriptedChecker::new(false),
        ScriptedChecker::new(false),
    )
    .unwrap();

    let RunOutcome::Completed { project, .. } = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(project.name, "app");
}

#[test]
fn test_missing_results_file_is_general_error() {
    let err = execute(
        &[
            "--blackduck.offline.mode",
            "--detect.detector.results=/nonexistent/detect/results.json",
        ],
        ScriptedChecker::new(true),
        ScriptedChecker::new(true),
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), 99);
}
