//! Pipeline orchestrator - runs convert then generate.
//!
//! The overrides file is created before the first step and finished (deleted
//! or kept) after the last step that ran, whether the job succeeded or not.

use std::path::{Path, PathBuf};

use config_loader::{OverridesFile, QuantizationOverrides};
use contracts::{
    ConversionJob, ConvertArtifacts, JobReport, LibraryArtifact, Result, ToolCommand,
};
use toolchain::{
    collect_convert_artifacts, convert_command, generate_command, locate_library, run_checked,
    ToolRunner,
};
use tracing::{info, warn};

/// Placeholder shown for the overrides path in a dry-run plan
const PLANNED_OVERRIDES: &str = "<quant_overrides.json>";

/// What a run would do, without doing it
#[derive(Debug, Clone)]
pub struct PipelinePlan {
    pub overrides: String,
    pub convert: ToolCommand,
    pub generate: ToolCommand,
}

impl PipelinePlan {
    pub fn print(&self) {
        println!("\n=== Planned Commands ===\n");
        println!("Quantization overrides:");
        println!("{}", self.overrides);
        println!("\n[1/2] convert:");
        println!("  {}", self.convert);
        println!("\n[2/2] generate (-b <bin> is added when the converter emits one):");
        println!("  {}", self.generate);
        println!();
    }
}

/// Main pipeline orchestrator
pub struct Pipeline<R> {
    job: ConversionJob,
    runner: R,
    /// Where the overrides file is written (None = system temp dir)
    overrides_dir: Option<PathBuf>,
}

impl<R: ToolRunner> Pipeline<R> {
    /// Create a new pipeline for `job`
    pub fn new(job: ConversionJob, runner: R) -> Self {
        Self {
            job,
            runner,
            overrides_dir: None,
        }
    }

    /// Write the overrides file into `dir` instead of the system temp dir
    #[cfg(test)]
    pub fn with_overrides_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.overrides_dir = Some(dir.into());
        self
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Render everything a run would execute
    pub fn plan(&self) -> Result<PipelinePlan> {
        let overrides = QuantizationOverrides::from_options(&self.job.quantization).render()?;
        let convert = convert_command(&self.job, Path::new(PLANNED_OVERRIDES));
        let generate = generate_command(
            &self.job,
            &ConvertArtifacts {
                cpp: self.job.cpp_path(),
                bin: None,
                net_json: None,
            },
        );
        Ok(PipelinePlan {
            overrides,
            convert,
            generate,
        })
    }

    /// Run both steps to completion
    pub async fn run(&self) -> Result<JobReport> {
        let overrides = self.write_overrides()?;
        if self.job.verbose {
            println!("Quantization overrides ({}):", overrides.path().display());
            println!("{}", overrides.contents());
        }

        let outcome = self.run_steps(overrides.path()).await;

        let retained = match overrides.finish(self.job.cleanup) {
            Ok(retained) => retained,
            Err(e) => {
                warn!(error = %e, "Failed to finalize quantization overrides file");
                None
            }
        };
        match (&retained, &outcome) {
            (Some(path), Err(_)) => {
                warn!(path = %path.display(), "Job failed, quantization overrides kept")
            }
            (Some(path), Ok(_)) => info!(path = %path.display(), "Quantization overrides kept"),
            (None, _) => {}
        }

        let (convert, library) = outcome?;
        Ok(JobReport {
            job: self.job.clone(),
            convert,
            library,
            retained_overrides: retained,
        })
    }

    fn write_overrides(&self) -> Result<OverridesFile> {
        let overrides = QuantizationOverrides::from_options(&self.job.quantization);
        match self.overrides_dir {
            Some(ref dir) => OverridesFile::create_in(dir, &overrides),
            None => OverridesFile::create(&overrides),
        }
    }

    async fn run_steps(&self, overrides: &Path) -> Result<(ConvertArtifacts, LibraryArtifact)> {
        info!(input = %self.job.input.display(), "[1/2] Converting model");
        let convert_cmd = convert_command(&self.job, overrides);
        self.echo(&convert_cmd);
        run_checked(&self.runner, &convert_cmd).await?;
        let convert = collect_convert_artifacts(&self.job)?;

        info!(platform = %self.job.target, "[2/2] Generating model library");
        let generate_cmd = generate_command(&self.job, &convert);
        self.echo(&generate_cmd);
        run_checked(&self.runner, &generate_cmd).await?;
        let library = locate_library(&self.job);

        Ok((convert, library))
    }

    fn echo(&self, command: &ToolCommand) {
        if self.job.verbose {
            println!("+ {command}");
        }
    }
}
