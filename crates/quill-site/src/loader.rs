//! Content directory scanning.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::BuildError;

/// Collect article files under `source_dir` with a recognized extension.
///
/// Hidden files and anything matched by ignore files are skipped, the same
/// filtering the rest of the toolchain applies. Results are sorted for
/// deterministic build order.
pub(crate) fn scan(source_dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();
    for entry in WalkBuilder::new(source_dir).build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ty| ty.is_file()) {
            continue;
        }
        let path = entry.into_path();
        let recognized = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e == ext));
        if recognized {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
