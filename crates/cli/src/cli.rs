//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};
use config_loader::ResolveOptions;
use contracts::{DEFAULT_MODEL_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_TARGET};
use std::path::PathBuf;

/// QNN Pipeline - convert a model and build its QNN model library
#[derive(Parser, Debug)]
#[command(
    name = "qnn-pipeline",
    author,
    version,
    about = "Convert a model with float16 quantization and build a QNN model library",
    long_about = "Runs the QNN model converter and the model library generator in sequence.\n\n\
                  Writes a quantization overrides file (float16, symmetric), converts the \n\
                  input network to <model-name>.cpp/.bin, then compiles a shared library \n\
                  for the chosen target under <output-dir>/model_libs/<target>/."
)]
pub struct Cli {
    /// Input model file (e.g. model.onnx)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output directory, created if missing
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Base name for generated artifacts
    #[arg(short = 'n', long, value_name = "NAME", default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    /// QNN SDK root (auto-detected when unset)
    #[arg(short, long, value_name = "DIR", env = "QNN_SDK_ROOT")]
    pub sdk_root: Option<PathBuf>,

    /// Converter executable [default: <sdk-root>/bin/x86_64-linux-clang/qnn-onnx-converter]
    #[arg(short, long, value_name = "PATH")]
    pub converter: Option<PathBuf>,

    /// Library generator executable [default: <sdk-root>/bin/x86_64-linux-clang/qnn-model-lib-generator]
    #[arg(short, long, value_name = "PATH")]
    pub generator: Option<PathBuf>,

    /// Target platform for the model library
    #[arg(short, long, value_name = "TARGET", default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Comma-separated op package libraries passed to the converter
    #[arg(short = 'p', long, value_name = "LIST")]
    pub op_packages: Option<String>,

    /// Calibration input list file
    #[arg(long, value_name = "PATH")]
    pub input_list: Option<PathBuf>,

    /// Enable per-channel weight quantization
    #[arg(long)]
    pub per_channel: bool,

    /// Percentile calibration value for activations (e.g. 99.99)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub percentile: Option<String>,

    /// Echo commands and overrides; -vv for trace logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Keep the quantization overrides file after the run
    #[arg(long)]
    pub no_cleanup: bool,

    /// Resolve configuration and print the planned commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        env = "QNN_PIPELINE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

impl Cli {
    /// Raw options for the job resolver
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            input: self.input.clone(),
            output_dir: Some(self.output_dir.clone()),
            model_name: Some(self.model_name.clone()),
            sdk_root: self.sdk_root.clone(),
            converter: self.converter.clone(),
            generator: self.generator.clone(),
            target: Some(self.target.clone()),
            op_packages: self.op_packages.clone(),
            input_list: self.input_list.clone(),
            per_channel: self.per_channel,
            percentile: self.percentile.clone(),
            verbose: self.verbose > 0,
            no_cleanup: self.no_cleanup,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
