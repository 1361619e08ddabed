//! JSON dataset output.

use std::path::{Path, PathBuf};

use lens_core::{LensError, Result};
use serde::Serialize;
use tracing::debug;

/// Serialize `dataset` to `dir/file_name`, creating `dir` if absent.
///
/// Returns the path written. Fails with [`LensError::Write`] when the
/// directory cannot be created or the file cannot be written.
pub fn write_dataset<T: Serialize>(dir: &Path, file_name: &str, dataset: &T) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| LensError::Write {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(file_name);
    let json = serde_json::to_string(dataset)?;
    std::fs::write(&path, json).map_err(|e| LensError::Write {
        path: path.clone(),
        source: e,
    })?;

    debug!("Wrote {}", path.display());

    Ok(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
