//! Schema setup, applied every time a database is opened.
//!
//! Each script only creates what is missing, so reopening an existing file
//! is a no-op.

use crate::RigDb;
use crate::error::DatabaseError;

/// Users, repos, scripts.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");
/// Equipment inventory.
const MIGRATION_002: &str = include_str!("../migrations/002_inventory.sql");

impl RigDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        self.conn
            .execute_batch(MIGRATION_002)
            .await
            .map_err(|e| DatabaseError::Migration(format!("002_inventory: {e}")))?;
        Ok(())
    }
}
