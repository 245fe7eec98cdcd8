//! Mirror maintenance: clone when absent, checkout when present.
//!
//! A present mirror is never fetched or pulled; it only switches branches
//! among what the initial clone brought down.

use std::path::{Path, PathBuf};

use rig_core::enums::MirrorAction;
use serde::Serialize;

use crate::command::{reject_option_like, run_git};
use crate::error::GitError;
use crate::repo::{current_branch, head_commit, is_repository};

#[derive(Debug, Clone, Serialize)]
pub struct MirrorOutcome {
    pub action: MirrorAction,
    pub path: PathBuf,
    pub branch: Option<String>,
    pub head: Option<String>,
}

/// Bring the mirror at `local_path` to `branch`, cloning `url` if needed.
pub fn ensure_mirror(url: &str, branch: &str, local_path: &Path) -> Result<MirrorOutcome, GitError> {
    let action = if local_path.exists() {
        checkout_branch(local_path, branch)?;
        MirrorAction::CheckedOut
    } else {
        clone_branch(url, branch, local_path)?;
        MirrorAction::Cloned
    };

    let outcome = MirrorOutcome {
        action,
        path: local_path.to_path_buf(),
        branch: current_branch(local_path)?,
        head: head_commit(local_path)?,
    };
    tracing::info!(
        path = %local_path.display(),
        action = %outcome.action,
        head = outcome.head.as_deref().unwrap_or("-"),
        "mirror ready"
    );
    Ok(outcome)
}

/// `git clone --branch <branch> -- <url> <dest>`.
pub fn clone_branch(url: &str, branch: &str, dest: &Path) -> Result<(), GitError> {
    reject_option_like("url", url)?;
    reject_option_like("branch", branch)?;
    let Some(dir_name) = dest.file_name() else {
        return Err(GitError::InvalidArgument(format!(
            "clone destination has no directory name: {}",
            dest.display()
        )));
    };
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;
    let dir_name = dir_name.to_string_lossy();
    run_git(parent, &["clone", "--branch", branch, "--", url, &dir_name])?;
    Ok(())
}

/// `git checkout <branch> --` inside an existing working copy.
pub fn checkout_branch(path: &Path, branch: &str) -> Result<(), GitError> {
    reject_option_like("branch", branch)?;
    if !is_repository(path) {
        return Err(GitError::NotGitRepo(path.to_path_buf()));
    }
    run_git(path, &["checkout", branch, "--"])?;
    Ok(())
}
