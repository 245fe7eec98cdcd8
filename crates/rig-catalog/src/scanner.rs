//! Catalog scan: walk a mirror, extract each tracked file, persist the row.
//!
//! Files are processed one at a time and persisted immediately, so a
//! persistence failure stops the scan with the earlier rows already stored.

use std::path::{Path, PathBuf};

use rig_core::entities::{CatalogedScript, MirroredRepo};
use rig_db::service::RigService;

use crate::error::CatalogError;
use crate::walk::tracked_files;

/// Scans mirrors for files with one tracked extension.
#[derive(Debug, Clone)]
pub struct Scanner {
    extension: String,
}

impl Scanner {
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Catalog every tracked file under the mirror of `repo`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Database` on the first row that fails to
    /// persist. Per-file extraction problems never fail the scan.
    pub async fn scan_repository(
        &self,
        service: &RigService,
        repo: &MirroredRepo,
    ) -> Result<Vec<CatalogedScript>, CatalogError> {
        let root = PathBuf::from(&repo.local_path);
        let extension = self.extension.clone();
        let files = tokio::task::spawn_blocking(move || tracked_files(&root, &extension)).await?;
        tracing::debug!(repo = %repo.name, files = files.len(), "scan started");

        let mut scripts = Vec::with_capacity(files.len());
        for path in files {
            let (abs_path, filename) = describe(&path);
            let metadata =
                tokio::task::spawn_blocking(move || rig_parser::extract_file_metadata(&path))
                    .await?;
            let script = service
                .upsert_script(&repo.id, &abs_path, &filename, &metadata)
                .await?;
            scripts.push(script);
        }

        tracing::info!(repo = %repo.name, scripts = scripts.len(), "scan finished");
        Ok(scripts)
    }
}

fn describe(path: &Path) -> (String, String) {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (path.to_string_lossy().into_owned(), filename)
}
