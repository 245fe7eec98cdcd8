//! Database error types for rig-db.

use rig_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Lookup by id found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Input rejected before or by the schema (bad value, duplicate, missing reference).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Translate SQLite constraint failures into validation errors.
    ///
    /// Everything else stays a `LibSql` error.
    pub(crate) fn classify(error: libsql::Error) -> Self {
        let msg = error.to_string();
        if let Some(rest) = msg.split("UNIQUE constraint failed: ").nth(1) {
            let column = rest.split_whitespace().next().unwrap_or(rest);
            return Self::Validation(format!("duplicate value for {column}"));
        }
        if msg.contains("FOREIGN KEY constraint failed") {
            return Self::Validation(
                "record references a missing row or is still referenced".to_string(),
            );
        }
        if let Some(rest) = msg.split("NOT NULL constraint failed: ").nth(1) {
            return Self::Validation(format!("missing value for {}", rest.trim()));
        }
        if msg.contains("CHECK constraint failed") {
            return Self::Validation(msg);
        }
        Self::LibSql(error)
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
