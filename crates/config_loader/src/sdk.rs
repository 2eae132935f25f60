//! SDK root detection and tool path resolution.

use std::path::{Path, PathBuf};

use contracts::{PipelineError, Result};
use tracing::{debug, info};

/// Host binary directory inside the SDK; its presence marks an SDK root.
pub const SDK_BIN_DIR: &str = "bin/x86_64-linux-clang";

/// Converter executable name inside [`SDK_BIN_DIR`]
pub const CONVERTER_NAME: &str = "qnn-onnx-converter";

/// Library generator executable name inside [`SDK_BIN_DIR`]
pub const GENERATOR_NAME: &str = "qnn-model-lib-generator";

/// Resolve the SDK root.
///
/// An explicit root must be an existing directory. Without one, the ancestors
/// of `search_origin` are scanned for the first directory containing
/// [`SDK_BIN_DIR`]. Returns `Ok(None)` when nothing is found.
pub fn resolve_sdk_root(
    explicit: Option<&Path>,
    search_origin: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if let Some(root) = explicit {
        if !root.is_dir() {
            return Err(PipelineError::config(
                "sdk-root",
                format!("SDK root is not a directory: {}", root.display()),
            ));
        }
        return Ok(Some(root.to_path_buf()));
    }

    let detected = search_origin.and_then(detect_sdk_root);
    if let Some(ref root) = detected {
        info!(sdk_root = %root.display(), "Auto-detected SDK root");
    }
    Ok(detected)
}

/// First ancestor of `origin` (inclusive) that looks like an SDK root
pub fn detect_sdk_root(origin: &Path) -> Option<PathBuf> {
    origin
        .ancestors()
        .find(|dir| dir.join(SDK_BIN_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Resolve one tool executable.
///
/// Explicit paths win; otherwise the tool is derived from the SDK root. A
/// candidate that is not a file is looked up on `PATH` before giving up.
pub fn resolve_tool(
    field: &str,
    explicit: Option<&Path>,
    sdk_root: Option<&Path>,
    default_name: &str,
) -> Result<PathBuf> {
    let candidate = match (explicit, sdk_root) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(root)) => root.join(SDK_BIN_DIR).join(default_name),
        (None, None) => {
            return Err(PipelineError::config(
                "sdk-root",
                format!(
                    "cannot locate {default_name}: SDK root not set \
                     (use --sdk-root or QNN_SDK_ROOT, or pass --{field})"
                ),
            ))
        }
    };

    if candidate.is_file() {
        return Ok(candidate);
    }

    let lookup: &Path = if explicit.is_some() {
        &candidate
    } else {
        Path::new(default_name)
    };
    match which::which(lookup) {
        Ok(found) => {
            debug!(tool = default_name, path = %found.display(), "Resolved tool on PATH");
            Ok(found)
        }
        Err(_) => Err(PipelineError::config(
            field,
            format!(
                "{} not found: {} does not exist and is not on PATH",
                default_name,
                candidate.display()
            ),
        )),
    }
}
