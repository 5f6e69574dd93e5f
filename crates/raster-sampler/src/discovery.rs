//! Recursive file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::SampleResult;

/// All files under `root` whose name ends with `ext`, sorted by path.
///
/// A leading `.` is added to `ext` when missing, so `"tif"` and `".tif"`
/// are equivalent.
pub fn list_ext(root: impl AsRef<Path>, ext: &str) -> SampleResult<Vec<PathBuf>> {
    let suffix = if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(&suffix) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Directories under `root` whose name ends with `suffix`, sorted by path.
///
/// Matching directories are not descended into.
pub fn list_dirs(root: impl AsRef<Path>, suffix: &str) -> SampleResult<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut dirs = Vec::new();
    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        if entry.file_type().is_dir() && entry.file_name().to_string_lossy().ends_with(suffix) {
            dirs.push(entry.into_path());
            walker.skip_current_dir();
        }
    }
    Ok(dirs)
}
