//! Artifact discovery after each tool run.
//!
//! When several candidates match, the lexicographically first path wins.

use std::path::{Path, PathBuf};

use contracts::{ConversionJob, ConvertArtifacts, LibraryArtifact, PipelineError, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Collect converter outputs
///
/// # Errors
/// `OutputMissing` when `<name>.cpp` was not written.
pub fn collect_convert_artifacts(job: &ConversionJob) -> Result<ConvertArtifacts> {
    let cpp = job.cpp_path();
    if !cpp.is_file() {
        return Err(PipelineError::output_missing("converter output (.cpp)", &cpp));
    }
    info!(path = %cpp.display(), "Model source generated");

    let bin = find_first_with_extension(&job.output_dir, "bin")?;
    match bin {
        Some(ref path) => info!(path = %path.display(), "Model weights found"),
        None => warn!(
            dir = %job.output_dir.display(),
            "No .bin file produced; generating without weights"
        ),
    }

    let net_json = Some(job.net_json_path()).filter(|p| p.is_file());
    if let Some(ref path) = net_json {
        debug!(path = %path.display(), "Network description found");
    }

    Ok(ConvertArtifacts { cpp, bin, net_json })
}

/// First regular file in `dir` (non-recursive) with extension `ext`
pub fn find_first_with_extension(dir: &Path, ext: &str) -> Result<Option<PathBuf>> {
    let mut matches: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == ext))
        .collect();
    matches.sort();

    if matches.len() > 1 {
        debug!(count = matches.len(), ext, "Multiple candidates, taking the first");
    }
    Ok(matches.into_iter().next())
}

/// Locate the generated shared library
///
/// Never fails: a missing library is reported as [`LibraryArtifact::Missing`].
pub fn locate_library(job: &ConversionJob) -> LibraryArtifact {
    let conventional = job.conventional_library_path();
    if conventional.is_file() {
        info!(path = %conventional.display(), "Model library generated");
        return LibraryArtifact::Conventional(conventional);
    }

    let libs_dir = job.model_libs_dir();
    let discovered = WalkDir::new(&libs_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .find(|path| path.extension().is_some_and(|e| e == "so"));

    match discovered {
        Some(path) => {
            info!(path = %path.display(), "Model library found outside the default location");
            LibraryArtifact::Discovered(path)
        }
        None => {
            warn!(dir = %libs_dir.display(), "No shared library found");
            LibraryArtifact::Missing
        }
    }
}
