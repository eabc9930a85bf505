//! CLI entry point - the composition root.
//!
//! Parses properties, boots the requested products and exits with detect's
//! exit code.

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use detect_cli::{Cli, RunOutcome, bootstrap, run};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match bootstrap(&cli) {
        Ok(context) => run(&context, &cli.project).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(RunOutcome::ConnectionTestSucceeded) => {
            println!("Connection test succeeded.");
            Ok(())
        }
        Ok(RunOutcome::Completed { project, .. }) => {
            println!("Project: {} / {}", project.name, project.version);
            Ok(())
        }
        Err(err) => {
            error!(exit_code = err.exit_code(), "{err}");
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
