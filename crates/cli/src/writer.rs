//! Writes rendered artifacts to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use wsgen_core::Rendered;

/// Create `out_dir` if needed and write every artifact into it.
///
/// Returns the written paths in the order given.
pub fn write_all(out_dir: &Path, rendered: &[Rendered]) -> Result<Vec<PathBuf>, String> {
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create output directory {}: {err}", out_dir.display()))?;

    let mut written = Vec::with_capacity(rendered.len());
    for item in rendered {
        let path = out_dir.join(item.artifact.file_name());
        fs::write(&path, &item.source)
            .map_err(|err| format!("Failed to write {}: {err}", path.display()))?;
        debug!(path = %path.display(), bytes = item.source.len(), "Wrote artifact.");
        written.push(path);
    }
    Ok(written)
}
