//! Download trigger: writes an export artifact into the export directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tickview_core::ExportArtifact;

/// Write `artifact` to `{dir}/{file_name}`, creating `dir` if needed.
/// An existing file with the same name is replaced.
pub fn save(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.payload)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
