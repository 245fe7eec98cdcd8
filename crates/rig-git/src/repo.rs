//! Read-only repository inspection through gix.

use std::path::Path;

use crate::error::GitError;

fn open(path: &Path) -> Result<gix::Repository, GitError> {
    gix::open(path).map_err(|_| GitError::NotGitRepo(path.to_path_buf()))
}

/// `true` if `path` is the working directory of a git repository.
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    gix::open(path).is_ok()
}

/// Short name of the checked-out branch, or `None` for a detached HEAD.
pub fn current_branch(path: &Path) -> Result<Option<String>, GitError> {
    let repo = open(path)?;
    let head = repo.head().map_err(|e| GitError::Git(e.to_string()))?;
    Ok(head.referent_name().map(|name| {
        let full = name.as_bstr().to_string();
        full.strip_prefix("refs/heads/")
            .map_or_else(|| full.clone(), ToString::to_string)
    }))
}

/// Full hex id of the HEAD commit, or `None` for an unborn branch.
pub fn head_commit(path: &Path) -> Result<Option<String>, GitError> {
    let repo = open(path)?;
    let head = repo.head().map_err(|e| GitError::Git(e.to_string()))?;
    Ok(head.id().map(|id| id.to_string()))
}
