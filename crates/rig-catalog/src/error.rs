use rig_core::errors::CoreError;
use rig_db::error::DatabaseError;
use rig_git::GitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    /// Clone or checkout failed.
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<CoreError> for CatalogError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound(format!("{entity_type} {id}")),
            CoreError::Other(e) => Self::Task(e.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for CatalogError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Task(error.to_string())
    }
}
