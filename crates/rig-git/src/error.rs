use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The git CLI ran and failed; carries its stderr.
    #[error("git error: {0}")]
    Git(String),
    #[error("not a git repository: {0}")]
    NotGitRepo(PathBuf),
    #[error("invalid git argument: {0}")]
    InvalidArgument(String),
}
