//! Finds the source files a check run operates on.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively collects `.scala` files under `root`, sorted for
/// deterministic run order. Unreadable directory entries are dropped; an
/// unreadable file surfaces later as a Skip when the runner opens it.
pub fn discover_sources<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "scala")
                    .unwrap_or(false)
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();
    files
}
