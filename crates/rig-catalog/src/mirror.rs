//! Repository sync: mirror on disk, record in the database, then scan.

use std::path::{Path, PathBuf};

use rig_config::{CatalogConfig, StorageConfig};
use rig_core::entities::{CatalogedScript, MirroredRepo};
use rig_core::enums::MirrorAction;
use rig_core::responses::{CheckoutResponse, SyncResponse};
use rig_core::validate;
use rig_db::service::RigService;

use crate::error::CatalogError;
use crate::scanner::Scanner;

/// Everything a sync produced.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub repo: MirroredRepo,
    pub action: MirrorAction,
    pub scripts: Vec<CatalogedScript>,
}

impl SyncOutcome {
    #[must_use]
    pub fn into_response(self) -> SyncResponse {
        SyncResponse {
            msg: format!(
                "Repository '{}' synced in {}",
                self.repo.name, self.repo.local_path
            ),
            scripts_count: self.scripts.len(),
            repo: self.repo,
            action: self.action,
        }
    }
}

/// Owns the mirror layout and the stamp policy.
#[derive(Debug, Clone)]
pub struct MirrorManager {
    repos_base: PathBuf,
    current_repo: Option<String>,
    stamp_after_scan: bool,
    scanner: Scanner,
}

impl MirrorManager {
    #[must_use]
    pub fn new(storage: &StorageConfig, catalog: &CatalogConfig) -> Self {
        Self {
            repos_base: storage.repos_base_path.clone(),
            current_repo: storage.current_repo.clone(),
            stamp_after_scan: catalog.stamp_after_scan,
            scanner: Scanner::new(catalog.tracked_extension.clone()),
        }
    }

    #[must_use]
    pub fn repos_base(&self) -> &Path {
        &self.repos_base
    }

    #[must_use]
    pub const fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Clone or check out `name`, upsert its record, and rescan its files.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Validation` for a bad name, or a url/branch that
    ///   looks like a git option.
    /// - `CatalogError::Git` when clone or checkout fails; nothing is recorded.
    /// - `CatalogError::Database` when the record or a catalog row cannot be
    ///   written.
    pub async fn sync_repository(
        &self,
        service: &RigService,
        name: &str,
        url: &str,
        branch: &str,
    ) -> Result<SyncOutcome, CatalogError> {
        let name = validate::path_segment("name", name)?;
        let url = validate::required_text("url", url, 2048)?;
        let branch = validate::required_text("branch", branch, 255)?;

        std::fs::create_dir_all(&self.repos_base)?;
        let local_path = self.repos_base.join(&name);

        let outcome = {
            let (url, branch, local_path) = (url.clone(), branch.clone(), local_path.clone());
            tokio::task::spawn_blocking(move || rig_git::ensure_mirror(&url, &branch, &local_path))
                .await??
        };
        let local_path = std::fs::canonicalize(&local_path)?;

        let repo = service
            .upsert_repo(
                &name,
                &url,
                &branch,
                &local_path.to_string_lossy(),
                !self.stamp_after_scan,
            )
            .await?;

        let scripts = self.scanner.scan_repository(service, &repo).await?;
        let repo = if self.stamp_after_scan {
            service.mark_repo_synced(&repo.id).await?
        } else {
            repo
        };

        Ok(SyncOutcome {
            repo,
            action: outcome.action,
            scripts,
        })
    }

    /// Check out `branch` in the configured current repository.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` when no current repository is
    /// configured, `CatalogError::NotFound` when its mirror is missing, and
    /// `CatalogError::Git` when checkout fails.
    pub async fn checkout_current(&self, branch: &str) -> Result<CheckoutResponse, CatalogError> {
        let Some(name) = self.current_repo.clone() else {
            return Err(CatalogError::Validation(
                "storage.current_repo is not configured".to_string(),
            ));
        };
        let path = self.repos_base.join(&name);
        if !path.is_dir() {
            return Err(CatalogError::NotFound(format!("repository {name}")));
        }

        let branch = branch.to_string();
        let (current, head) = tokio::task::spawn_blocking(move || {
            rig_git::checkout_branch(&path, &branch)?;
            Ok::<_, rig_git::GitError>((
                rig_git::current_branch(&path)?,
                rig_git::head_commit(&path)?,
            ))
        })
        .await??;

        tracing::info!(repo = %name, branch = current.as_deref().unwrap_or("-"), "checked out");
        Ok(CheckoutResponse {
            repo: name,
            branch: current,
            head,
        })
    }
}
