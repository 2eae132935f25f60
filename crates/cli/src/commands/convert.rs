//! Conversion command implementation.

use anyhow::{Context, Result};
use config_loader::JobResolver;
use toolchain::SystemToolRunner;
use tracing::info;

use crate::cli::Cli;
use crate::pipeline::{print_summary, Pipeline};

/// Resolve the job, then run (or plan) both steps
pub async fn run_conversion(cli: &Cli) -> Result<()> {
    let job = JobResolver::new()
        .resolve(&cli.resolve_options())
        .context("Invalid configuration")?;

    info!(
        input = %job.input.display(),
        output_dir = %job.output_dir.display(),
        model = %job.model_name,
        platform = %job.target,
        converter = %job.tools.converter.display(),
        generator = %job.tools.generator.display(),
        "Configuration resolved"
    );

    let pipeline = Pipeline::new(job, SystemToolRunner);

    if cli.dry_run {
        info!("Dry run mode - nothing will be executed");
        pipeline
            .plan()
            .context("Failed to render pipeline plan")?
            .print();
        return Ok(());
    }

    let report = pipeline.run().await.context("Conversion pipeline failed")?;
    print_summary(&report);

    info!("QNN pipeline finished");
    Ok(())
}
