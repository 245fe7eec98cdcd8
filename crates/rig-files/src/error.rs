use rig_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilesError {
    #[error("{0} not found")]
    NotFound(String),

    /// The path escapes its root or names a hidden entry.
    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0} is not valid UTF-8")]
    Decode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CoreError> for FilesError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound(format!("{entity_type} {id}")),
            CoreError::Other(e) => Self::Io(std::io::Error::other(e.to_string())),
        }
    }
}
