//! ConversionJob - Config Loader 输出
//!
//! 描述一次完整的转换任务：输入模型、输出目录、工具路径、目标平台、量化参数。

use std::path::{Path, PathBuf};

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Default model base name
pub const DEFAULT_MODEL_NAME: &str = "qnn_model";

/// Default target platform token
pub const DEFAULT_TARGET: &str = "aarch64-android";

/// Subdirectory of the output directory that receives generated libraries
pub const MODEL_LIBS_DIR: &str = "model_libs";

/// Fully-resolved conversion job
///
/// Produced once by the resolver; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionJob {
    /// Source network (e.g. `model.onnx`)
    pub input: PathBuf,

    /// Output directory (exists once the job is resolved)
    pub output_dir: PathBuf,

    /// Base name for generated artifacts
    pub model_name: String,

    /// External tool locations
    pub tools: ToolPaths,

    /// Target platform token (e.g. `aarch64-android`)
    pub target: String,

    /// Quantization settings
    pub quantization: QuantizationOptions,

    /// Op package libraries passed through to the converter
    pub op_packages: Vec<String>,

    /// Echo commands and overrides before running
    pub verbose: bool,

    /// Remove the overrides file when the job ends
    pub cleanup: bool,
}

impl ConversionJob {
    /// `<output_dir>/<model_name>.cpp`
    pub fn cpp_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.cpp", self.model_name))
    }

    /// `<output_dir>/<model_name>_net.json`
    pub fn net_json_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_net.json", self.model_name))
    }

    /// `<output_dir>/model_libs`
    pub fn model_libs_dir(&self) -> PathBuf {
        self.output_dir.join(MODEL_LIBS_DIR)
    }

    /// `<output_dir>/model_libs/<target>/libqnn_model.so`
    pub fn conventional_library_path(&self) -> PathBuf {
        self.model_libs_dir()
            .join(&self.target)
            .join("libqnn_model.so")
    }

    /// Whether the target is the on-device Android ABI
    pub fn is_android_target(&self) -> bool {
        self.target == DEFAULT_TARGET
    }
}

/// Resolved external tool locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// SDK root, when one was given or detected
    pub sdk_root: Option<PathBuf>,
    /// Model converter executable
    pub converter: PathBuf,
    /// Model library generator executable
    pub generator: PathBuf,
}

/// Quantization settings
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizationOptions {
    /// Per-channel weight quantization
    pub per_channel: bool,
    /// Percentile calibration value in `(0, 100]`
    pub percentile: Option<f64>,
    /// Calibration input list
    pub input_list: Option<PathBuf>,
}

impl QuantizationOptions {
    /// Symmetric quantization is fixed policy.
    pub const SYMMETRIC: bool = true;

    /// Input list as a borrowed path
    pub fn input_list(&self) -> Option<&Path> {
        self.input_list.as_deref()
    }
}
