//! Test data locations and scratch directories.

use std::path::PathBuf;

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Searches for an optional real-world raster used by tests.
///
/// Looks in `$TEST_DATA_DIR` first, then `testdata/` at the workspace root.
/// Large scenes are not committed, so callers should skip when this returns
/// `None` (see [`require_test_file!`](crate::require_test_file)).
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let env_dir = std::env::var("TEST_DATA_DIR").ok().map(PathBuf::from);
    env_dir
        .into_iter()
        .chain(std::iter::once(workspace_root().join("testdata")))
        .map(|dir| dir.join(name))
        .find(|path| path.exists())
}

/// Creates a temporary directory, removed when the returned `TempDir` drops.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory whose name starts with `prefix`.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }

    #[test]
    fn test_missing_file_not_found() {
        assert!(find_test_file("definitely_not_a_real_file_20120105.tif").is_none());
    }

    #[test]
    fn test_temp_test_dir_with_prefix() {
        let dir = temp_test_dir_with_prefix("raster_test_");
        assert!(dir.path().exists());
        assert!(dir.path().to_string_lossy().contains("raster_test_"));
    }
}
