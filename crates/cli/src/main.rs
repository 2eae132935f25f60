//! # QNN Pipeline CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Option parsing and job resolution
//! - Sequential convert / generate orchestration
//! - Summary and deployment hints

mod cli;
mod commands;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::LoggingConfig;
use tracing::info;

use cli::Cli;
use commands::run_conversion;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help / --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    observability::init_logging(&LoggingConfig::from_verbosity(
        cli.log_format.into(),
        cli.verbose,
        cli.quiet,
    ))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "QNN pipeline starting"
    );

    let result = run_conversion(&cli).await;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}
