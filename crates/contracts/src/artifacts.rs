//! Artifacts produced by the external tools.

use std::path::{Path, PathBuf};

use crate::ConversionJob;

/// Converter outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertArtifacts {
    /// `<name>.cpp`, always present after a successful convert step
    pub cpp: PathBuf,
    /// First `.bin` in the output directory
    pub bin: Option<PathBuf>,
    /// `<name>_net.json`
    pub net_json: Option<PathBuf>,
}

/// Generator output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryArtifact {
    /// Found at `<model_libs>/<target>/libqnn_model.so`
    Conventional(PathBuf),
    /// Found elsewhere under `<model_libs>`
    Discovered(PathBuf),
    /// No shared library anywhere under `<model_libs>`
    Missing,
}

impl LibraryArtifact {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Conventional(p) | Self::Discovered(p) => Some(p),
            Self::Missing => None,
        }
    }
}

/// Everything the summary needs once both steps succeeded
#[derive(Debug, Clone)]
pub struct JobReport {
    pub job: ConversionJob,
    pub convert: ConvertArtifacts,
    pub library: LibraryArtifact,
    /// Overrides file left on disk because cleanup was disabled
    pub retained_overrides: Option<PathBuf>,
}
