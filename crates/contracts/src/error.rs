//! Layered error definitions
//!
//! Categorized by source: config / tool invocation / output artifacts

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ToolStep;

/// Unified error type
#[derive(Debug, Error)]
pub enum PipelineError {
    // ===== Configuration Errors =====
    /// Bad or missing argument, missing file, unresolvable tool path
    #[error("config error at '{field}': {message}")]
    Config { field: String, message: String },

    // ===== Tool Errors =====
    /// External tool exited nonzero or could not be started
    #[error("{step} step failed ({}): {message}", program.display())]
    ToolInvocation {
        step: ToolStep,
        program: PathBuf,
        message: String,
    },

    // ===== Artifact Errors =====
    /// Expected artifact absent after a successful invocation
    #[error("expected {artifact} not found at {}", path.display())]
    OutputMissing { artifact: String, path: PathBuf },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Create configuration error
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create tool invocation error
    pub fn tool_invocation(
        step: ToolStep,
        program: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::ToolInvocation {
            step,
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create missing output error
    pub fn output_missing(artifact: impl Into<String>, path: &Path) -> Self {
        Self::OutputMissing {
            artifact: artifact.into(),
            path: path.to_path_buf(),
        }
    }

    /// Whether the error was raised before any external tool ran
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_field() {
        let err = PipelineError::config("input", "file does not exist: model.onnx");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "config error at 'input': file does not exist: model.onnx"
        );
    }

    #[test]
    fn test_tool_invocation_display() {
        let err = PipelineError::tool_invocation(
            ToolStep::Convert,
            "/sdk/bin/qnn-onnx-converter",
            "exited with status 3",
        );
        assert!(!err.is_config());
        assert_eq!(
            err.to_string(),
            "convert step failed (/sdk/bin/qnn-onnx-converter): exited with status 3"
        );
    }

    #[test]
    fn test_output_missing_display() {
        let err = PipelineError::output_missing("model source", Path::new("out/qnn_model.cpp"));
        assert_eq!(
            err.to_string(),
            "expected model source not found at out/qnn_model.cpp"
        );
    }
}
