//! Directory scan over `.stl` files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, StlError};
use crate::read::{summarize_file, StlSummary};

/// True when `name` ends in the (case-sensitive) `.stl` extension.
pub fn is_stl_name(name: &str) -> bool {
    name.ends_with(".stl")
}

/// Summarize every `.stl` file directly inside `dir`.
///
/// Entries are processed in file-name order. Symlinks are followed;
/// subdirectories and files with any other suffix are skipped. The first file that fails aborts the scan
/// with [`StlError::File`].
pub fn scan_dir(dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, StlSummary)>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(StlError::NotADirectory(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    let mut skipped = 0usize;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = entry.file_name().to_str().is_some_and(is_stl_name);
        if matches && path.is_file() {
            paths.push(path);
        } else {
            trace!(path = %path.display(), "skipping entry");
            skipped += 1;
        }
    }
    paths.sort();
    debug!(
        dir = %dir.display(),
        matched = paths.len(),
        skipped,
        "scanned directory"
    );

    paths
        .into_iter()
        .map(|path| match summarize_file(&path) {
            Ok(summary) => Ok((path, summary)),
            Err(e) => Err(StlError::File {
                path,
                source: Box::new(e),
            }),
        })
        .collect()
}
