//! # Config Loader
//!
//! Job resolution and quantization overrides.
//!
//! Responsibilities:
//! - Validate raw options (paths, names, percentile)
//! - Locate the SDK and the converter / generator executables
//! - Produce an immutable `ConversionJob`
//! - Render the quantization overrides document
//!
//! # Example
//!
//! ```no_run
//! use config_loader::{JobResolver, ResolveOptions};
//! use std::path::PathBuf;
//!
//! let options = ResolveOptions {
//!     input: Some(PathBuf::from("model.onnx")),
//!     ..Default::default()
//! };
//! let job = JobResolver::new().resolve(&options).unwrap();
//! println!("Converter: {}", job.tools.converter.display());
//! ```

mod overrides;
mod sdk;
mod validator;

pub use contracts::ConversionJob;
pub use overrides::{
    ActivationQuantization, CalibrationMethod, OverridesFile, QuantScheme,
    QuantizationOverrides, WeightQuantization,
};
pub use sdk::{detect_sdk_root, CONVERTER_NAME, GENERATOR_NAME, SDK_BIN_DIR};

use std::path::{Path, PathBuf};

use contracts::{
    QuantizationOptions, Result, ToolPaths, DEFAULT_MODEL_NAME, DEFAULT_OUTPUT_DIR,
    DEFAULT_TARGET,
};
use tracing::debug;

/// Raw, unvalidated options as they arrive from flags / environment
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub model_name: Option<String>,
    pub sdk_root: Option<PathBuf>,
    pub converter: Option<PathBuf>,
    pub generator: Option<PathBuf>,
    pub target: Option<String>,
    /// Comma-separated
    pub op_packages: Option<String>,
    pub input_list: Option<PathBuf>,
    pub per_channel: bool,
    /// Decimal string
    pub percentile: Option<String>,
    pub verbose: bool,
    pub no_cleanup: bool,
}

/// Turns `ResolveOptions` into a `ConversionJob`
///
/// Checks run in order and the first failure is returned; the output
/// directory is created last, only once everything else is valid.
#[derive(Debug, Clone, Default)]
pub struct JobResolver {
    /// Where SDK auto-detection starts (normally the executable's directory)
    search_origin: Option<PathBuf>,
}

impl JobResolver {
    /// Resolver that auto-detects the SDK relative to the running executable
    pub fn new() -> Self {
        let search_origin = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self { search_origin }
    }

    /// Resolver that auto-detects the SDK relative to `origin`
    pub fn with_search_origin(origin: impl Into<PathBuf>) -> Self {
        Self {
            search_origin: Some(origin.into()),
        }
    }

    /// Resolve and validate
    ///
    /// # Errors
    /// `PipelineError::Config` naming the offending option.
    pub fn resolve(&self, options: &ResolveOptions) -> Result<ConversionJob> {
        let input = validator::validate_input(options.input.as_deref())?;

        let model_name = options
            .model_name
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
        validator::validate_model_name(&model_name)?;

        let target = options
            .target
            .clone()
            .unwrap_or_else(|| DEFAULT_TARGET.to_string());
        validator::validate_target(&target)?;

        let percentile = options
            .percentile
            .as_deref()
            .map(validator::parse_percentile)
            .transpose()?;
        let input_list = validator::validate_input_list(options.input_list.as_deref())?;

        let tools = self.resolve_tools(options)?;

        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        validator::ensure_output_dir(&output_dir)?;

        let job = ConversionJob {
            input,
            output_dir,
            model_name,
            tools,
            target,
            quantization: QuantizationOptions {
                per_channel: options.per_channel,
                percentile,
                input_list,
            },
            op_packages: validator::split_op_packages(options.op_packages.as_deref()),
            verbose: options.verbose,
            cleanup: !options.no_cleanup,
        };
        debug!(?job, "Resolved conversion job");
        Ok(job)
    }

    fn resolve_tools(&self, options: &ResolveOptions) -> Result<ToolPaths> {
        let needs_root = options.converter.is_none() || options.generator.is_none();
        let sdk_root = if needs_root || options.sdk_root.is_some() {
            sdk::resolve_sdk_root(options.sdk_root.as_deref(), self.search_origin.as_deref())?
        } else {
            None
        };

        let converter = sdk::resolve_tool(
            "converter",
            options.converter.as_deref(),
            sdk_root.as_deref(),
            CONVERTER_NAME,
        )?;
        let generator = sdk::resolve_tool(
            "generator",
            options.generator.as_deref(),
            sdk_root.as_deref(),
            GENERATOR_NAME,
        )?;

        Ok(ToolPaths {
            sdk_root,
            converter,
            generator,
        })
    }
}
