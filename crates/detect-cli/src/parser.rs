//! Main CLI parser.
//!
//! Long option names are detect property keys (`--blackduck.url`), and every
//! property falls back to its environment variable.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};
use detect_core::DetectorType;

/// Command-line interface for detect's product boot.
#[derive(Parser, Debug)]
#[command(name = "detect")]
#[command(about = "Decide, verify and boot the Black Duck and Polaris products for a scan")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub black_duck: BlackDuckArgs,

    #[command(flatten)]
    pub polaris: PolarisArgs,

    #[command(flatten)]
    pub boot: BootArgs,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Black Duck server properties.
#[derive(Args, Debug, Default, Clone)]
#[command(next_help_heading = "Black Duck")]
pub struct BlackDuckArgs {
    /// URL of the Black Duck server
    #[arg(id = "blackduck.url", long = "blackduck.url", env = "BLACKDUCK_URL")]
    pub url: Option<String>,

    /// API token used to authenticate
    #[arg(
        id = "blackduck.api.token",
        long = "blackduck.api.token",
        env = "BLACKDUCK_API_TOKEN",
        hide_env_values = true
    )]
    pub api_token: Option<String>,

    #[arg(id = "blackduck.username", long = "blackduck.username", env = "BLACKDUCK_USERNAME")]
    pub username: Option<String>,

    #[arg(
        id = "blackduck.password",
        long = "blackduck.password",
        env = "BLACKDUCK_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Use Black Duck without contacting the server
    #[arg(
        id = "blackduck.offline.mode",
        long = "blackduck.offline.mode",
        env = "BLACKDUCK_OFFLINE_MODE",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub offline_mode: bool,

    /// Request timeout in seconds
    #[arg(
        id = "blackduck.timeout",
        long = "blackduck.timeout",
        env = "BLACKDUCK_TIMEOUT",
        default_value_t = 120
    )]
    pub timeout: u64,

    /// Accept untrusted server certificates
    #[arg(
        id = "blackduck.trust.cert",
        long = "blackduck.trust.cert",
        env = "BLACKDUCK_TRUST_CERT",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub trust_cert: bool,

    #[arg(id = "blackduck.proxy.host", long = "blackduck.proxy.host", env = "BLACKDUCK_PROXY_HOST")]
    pub proxy_host: Option<String>,

    #[arg(id = "blackduck.proxy.port", long = "blackduck.proxy.port", env = "BLACKDUCK_PROXY_PORT")]
    pub proxy_port: Option<u16>,

    #[arg(
        id = "blackduck.proxy.username",
        long = "blackduck.proxy.username",
        env = "BLACKDUCK_PROXY_USERNAME"
    )]
    pub proxy_username: Option<String>,

    #[arg(
        id = "blackduck.proxy.password",
        long = "blackduck.proxy.password",
        env = "BLACKDUCK_PROXY_PASSWORD",
        hide_env_values = true
    )]
    pub proxy_password: Option<String>,
}

/// Polaris server properties.
#[derive(Args, Debug, Default, Clone)]
#[command(next_help_heading = "Polaris")]
pub struct PolarisArgs {
    /// URL of the Polaris server
    #[arg(id = "polaris.url", long = "polaris.url", env = "POLARIS_URL")]
    pub url: Option<String>,

    #[arg(
        id = "polaris.access.token",
        long = "polaris.access.token",
        env = "POLARIS_ACCESS_TOKEN",
        hide_env_values = true
    )]
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[arg(
        id = "polaris.timeout",
        long = "polaris.timeout",
        env = "POLARIS_TIMEOUT",
        default_value_t = 120
    )]
    pub timeout: u64,
}

/// Global boot behavior.
#[derive(Args, Debug, Default, Clone)]
#[command(next_help_heading = "Boot")]
pub struct BootArgs {
    /// Continue without a product whose connection test fails
    #[arg(
        id = "detect.ignore.connection.failures",
        long = "detect.ignore.connection.failures",
        env = "DETECT_IGNORE_CONNECTION_FAILURES",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub ignore_connection_failures: bool,

    /// Only test product connections, then exit
    #[arg(
        id = "detect.test.connection",
        long = "detect.test.connection",
        env = "DETECT_TEST_CONNECTION",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub test_connection: bool,

    #[arg(
        id = "detect.phone.home.disabled",
        long = "detect.phone.home.disabled",
        env = "DETECT_PHONE_HOME_DISABLED",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub phone_home_disabled: bool,
}

/// How to invent a project version when none is found.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[value(rename_all = "UPPER")]
pub enum VersionSchemeArg {
    #[default]
    Text,
    Timestamp,
}

/// Project identity properties.
#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Project")]
pub struct ProjectArgs {
    #[arg(id = "detect.project.name", long = "detect.project.name", env = "DETECT_PROJECT_NAME")]
    pub name: Option<String>,

    #[arg(
        id = "detect.project.version.name",
        long = "detect.project.version.name",
        env = "DETECT_PROJECT_VERSION_NAME"
    )]
    pub version: Option<String>,

    /// Detector whose project info wins (e.g. MAVEN, NPM)
    #[arg(
        id = "detect.project.detector",
        long = "detect.project.detector",
        env = "DETECT_PROJECT_DETECTOR"
    )]
    pub detector: Option<DetectorType>,

    #[arg(
        id = "detect.default.project.version.scheme",
        long = "detect.default.project.version.scheme",
        env = "DETECT_DEFAULT_PROJECT_VERSION_SCHEME",
        value_enum,
        ignore_case = true,
        default_value_t = VersionSchemeArg::Text
    )]
    pub default_version_scheme: VersionSchemeArg,

    #[arg(
        id = "detect.default.project.version.text",
        long = "detect.default.project.version.text",
        env = "DETECT_DEFAULT_PROJECT_VERSION_TEXT",
        default_value = detect_core::services::DEFAULT_PROJECT_VERSION_TEXT
    )]
    pub default_version_text: String,

    /// chrono format string for the TIMESTAMP scheme
    #[arg(
        id = "detect.default.project.version.timeformat",
        long = "detect.default.project.version.timeformat",
        env = "DETECT_DEFAULT_PROJECT_VERSION_TIMEFORMAT",
        default_value = detect_core::services::DEFAULT_PROJECT_VERSION_TIMEFORMAT
    )]
    pub default_version_timeformat: String,

    /// Directory being scanned; defaults to the working directory
    #[arg(id = "detect.source.path", long = "detect.source.path", env = "DETECT_SOURCE_PATH")]
    pub source_path: Option<PathBuf>,

    /// JSON file of detector project info candidates
    #[arg(
        id = "detect.detector.results",
        long = "detect.detector.results",
        env = "DETECT_DETECTOR_RESULTS"
    )]
    pub detector_results: Option<PathBuf>,
}

#[cfg(test)]
impl Cli {
    /// The command with every environment fallback removed.
    pub(crate) fn command_without_env() -> clap::Command {
        use clap::CommandFactory;
        Self::command().mut_args(|arg| arg.env(None::<&'static str>))
    }

    /// Parse `argv` from the command line alone, ignoring the process environment.
    pub(crate) fn try_parse_isolated<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::FromArgMatches;
        let matches = Self::command_without_env().try_get_matches_from(argv)?;
        Self::from_arg_matches(&matches)
    }
}
