//! Quantization overrides document and its temporary file.
//!
//! The converter reads a JSON document describing default activation and
//! weight encodings. Both are 16-bit float and always symmetric; per-channel
//! weights and percentile calibration are optional additions.

use std::io::Write;
use std::path::{Path, PathBuf};

use contracts::{PipelineError, QuantizationOptions, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

/// Encoding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuantScheme {
    #[serde(rename = "float16")]
    Float16,
}

/// Activation calibration method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationMethod {
    Percentile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationQuantization {
    pub scheme: QuantScheme,
    pub is_symmetric: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_method: Option<CalibrationMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightQuantization {
    pub scheme: QuantScheme,
    pub is_symmetric: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_channel_quantization: Option<bool>,
}

/// The overrides document passed to the converter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantizationOverrides {
    pub default_activation_quantization: ActivationQuantization,
    pub default_weight_quantization: WeightQuantization,
    pub activation_encodings: Map<String, Value>,
    pub param_encodings: Map<String, Value>,
}

impl QuantizationOverrides {
    pub fn from_options(options: &QuantizationOptions) -> Self {
        Self {
            default_activation_quantization: ActivationQuantization {
                scheme: QuantScheme::Float16,
                is_symmetric: QuantizationOptions::SYMMETRIC,
                calibration_method: options.percentile.map(|_| CalibrationMethod::Percentile),
                percentile_value: options.percentile,
            },
            default_weight_quantization: WeightQuantization {
                scheme: QuantScheme::Float16,
                is_symmetric: QuantizationOptions::SYMMETRIC,
                per_channel_quantization: options.per_channel.then_some(true),
            },
            activation_encodings: Map::new(),
            param_encodings: Map::new(),
        }
    }

    /// Pretty-printed JSON
    pub fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::Io(std::io::Error::other(e)))
    }
}

/// Uniquely-named overrides file, deleted on drop unless kept
#[derive(Debug)]
pub struct OverridesFile {
    file: NamedTempFile,
    contents: String,
}

impl OverridesFile {
    /// Render `overrides` into a fresh file in the system temp directory
    pub fn create(overrides: &QuantizationOverrides) -> Result<Self> {
        Self::create_in(&std::env::temp_dir(), overrides)
    }

    /// Render `overrides` into a fresh file inside `dir`
    pub fn create_in(dir: &Path, overrides: &QuantizationOverrides) -> Result<Self> {
        let contents = overrides.render()?;
        let mut file = tempfile::Builder::new()
            .prefix("quant_overrides_")
            .suffix(".json")
            .tempfile_in(dir)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;

        debug!(path = %file.path().display(), "Wrote quantization overrides");
        Ok(Self { file, contents })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Rendered JSON, as written
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Persist the file and return its path
    pub fn keep(self) -> Result<PathBuf> {
        let (_, path) = self.file.keep().map_err(|e| PipelineError::Io(e.error))?;
        Ok(path)
    }

    /// End of job: delete when `cleanup`, otherwise keep and return the path
    pub fn finish(self, cleanup: bool) -> Result<Option<PathBuf>> {
        if cleanup {
            let path = self.path().to_path_buf();
            self.file.close()?;
            debug!(path = %path.display(), "Removed quantization overrides");
            Ok(None)
        } else {
            self.keep().map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(per_channel: bool, percentile: Option<f64>) -> QuantizationOptions {
        QuantizationOptions {
            per_channel,
            percentile,
            input_list: None,
        }
    }

    fn rendered(per_channel: bool, percentile: Option<f64>) -> Value {
        let json = QuantizationOverrides::from_options(&options(per_channel, percentile))
            .render()
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_default_document_shape() {
        let doc = rendered(false, None);
        let expected = serde_json::json!({
            "default_activation_quantization": { "scheme": "float16", "is_symmetric": true },
            "default_weight_quantization": { "scheme": "float16", "is_symmetric": true },
            "activation_encodings": {},
            "param_encodings": {}
        });
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_symmetric_always_true() {
        for (per_channel, percentile) in [(false, None), (true, None), (true, Some(99.9))] {
            let doc = rendered(per_channel, percentile);
            assert_eq!(doc["default_activation_quantization"]["is_symmetric"], true);
            assert_eq!(doc["default_weight_quantization"]["is_symmetric"], true);
        }
    }

    #[test]
    fn test_percentile_keys() {
        let doc = rendered(false, Some(99.99));
        let act = &doc["default_activation_quantization"];
        assert_eq!(act["calibration_method"], "percentile");
        assert_eq!(act["percentile_value"], 99.99);

        let doc = rendered(false, None);
        let act = doc["default_activation_quantization"].as_object().unwrap();
        assert!(!act.contains_key("calibration_method"));
        assert!(!act.contains_key("percentile_value"));
    }

    #[test]
    fn test_per_channel_key() {
        let doc = rendered(true, None);
        assert_eq!(
            doc["default_weight_quantization"]["per_channel_quantization"],
            true
        );

        let doc = rendered(false, None);
        let weight = doc["default_weight_quantization"].as_object().unwrap();
        assert!(!weight.contains_key("per_channel_quantization"));
    }

    #[test]
    fn test_file_removed_on_cleanup() {
        let dir = TempDir::new().unwrap();
        let overrides = QuantizationOverrides::from_options(&options(false, None));
        let file = OverridesFile::create_in(dir.path(), &overrides).unwrap();
        let path = file.path().to_path_buf();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("quant_overrides_"));
        assert!(name.ends_with(".json"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), file.contents());

        assert_eq!(file.finish(true).unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_kept_without_cleanup() {
        let dir = TempDir::new().unwrap();
        let overrides = QuantizationOverrides::from_options(&options(true, Some(99.0)));
        let file = OverridesFile::create_in(dir.path(), &overrides).unwrap();
        let path = file.path().to_path_buf();

        let kept = file.finish(false).unwrap();
        assert_eq!(kept.as_deref(), Some(path.as_path()));
        assert!(path.exists());
    }

    #[test]
    fn test_file_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let overrides = QuantizationOverrides::from_options(&options(false, None));
        let path = {
            let file = OverridesFile::create_in(dir.path(), &overrides).unwrap();
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_files_are_unique() {
        let dir = TempDir::new().unwrap();
        let overrides = QuantizationOverrides::from_options(&options(false, None));
        let a = OverridesFile::create_in(dir.path(), &overrides).unwrap();
        let b = OverridesFile::create_in(dir.path(), &overrides).unwrap();
        assert_ne!(a.path(), b.path());
    }
}
