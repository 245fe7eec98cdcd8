//! File selection for catalog scans.
//!
//! Walks with every standard filter disabled: hidden files, `.gitignore`,
//! and friends are all visited. Only the tracked extension is kept.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Build a walker over `root` that visits entries sorted by file name.
#[must_use]
pub fn build_walker(root: &Path) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));
    builder.build()
}

/// Whether `path` carries `extension` (compared without the dot, case-sensitive).
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == extension.trim_start_matches('.'))
}

/// Every regular file under `root` with `extension`, sorted by path.
#[must_use]
pub fn tracked_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = build_walker(root)
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "walk entry skipped");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|path| has_extension(path, extension))
        .collect();
    files.sort();
    files
}
