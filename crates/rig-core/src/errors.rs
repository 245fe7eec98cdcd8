//! Cross-cutting error types.
//!
//! Domain-specific errors (`DatabaseError`, `GitError`, `FilesError`, ...) live
//! in their own crates and converge in `rig-server`.

use thiserror::Error;

/// Errors that can be raised by any rig crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (format, length, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
