//! Service layer over `RigDb`.
//!
//! All repository methods are implemented as `impl RigService` blocks in
//! [`crate::repos`].

use crate::RigDb;
use crate::error::DatabaseError;

/// Entry point for every persistence operation.
pub struct RigService {
    db: RigDb,
}

impl RigService {
    /// Open (or create) the database at `db_path`. Pass `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = RigDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Wrap an existing `RigDb`.
    #[must_use]
    pub const fn from_db(db: RigDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RigDb {
        &self.db
    }

    /// Fail with a validation error unless `table` has a row with `id`.
    ///
    /// Used to reject references to missing rows with a message that names them.
    pub(crate) async fn ensure_exists(
        &self,
        table: &str,
        label: &str,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .db
            .query(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id])
            .await?;
        if rows.next().await?.is_some() {
            Ok(())
        } else {
            Err(DatabaseError::Validation(format!(
                "{label} '{id}' does not exist"
            )))
        }
    }

    /// Delete the row with `id` from `table`.
    pub(crate) async fn delete_row(
        &self,
        table: &str,
        entity: &str,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found(entity, id));
        }
        Ok(())
    }
}
