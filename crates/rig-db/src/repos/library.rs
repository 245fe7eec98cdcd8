//! Test libraries.

use rig_core::entities::Library;
use rig_core::ids::PREFIX_LIBRARY;
use rig_core::validate::{self, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::SetClause;
use crate::service::RigService;
use crate::updates::LibraryUpdate;

fn row_to_library(row: &libsql::Row) -> Result<Library, DatabaseError> {
    Ok(Library {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        to_be_used: row.get::<i64>(2)? != 0,
    })
}

impl RigService {
    pub async fn create_library(
        &self,
        name: &str,
        to_be_used: bool,
    ) -> Result<Library, DatabaseError> {
        let name = validate::required_text("name", name, SHORT_TEXT)?;
        let id = self.db().generate_id(PREFIX_LIBRARY).await?;
        self.db()
            .execute(
                "INSERT INTO libraries (id, name, to_be_used) VALUES (?1, ?2, ?3)",
                libsql::params![id.as_str(), name, i64::from(to_be_used)],
            )
            .await?;
        self.get_library(&id).await
    }

    pub async fn get_library(&self, id: &str) -> Result<Library, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT id, name, to_be_used FROM libraries WHERE id = ?1", [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("library", id))?;
        row_to_library(&row)
    }

    pub async fn list_libraries(&self) -> Result<Vec<Library>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT id, name, to_be_used FROM libraries ORDER BY name, id",
                (),
            )
            .await?;
        let mut libraries = Vec::new();
        while let Some(row) = rows.next().await? {
            libraries.push(row_to_library(&row)?);
        }
        Ok(libraries)
    }

    pub async fn update_library(
        &self,
        id: &str,
        update: &LibraryUpdate,
    ) -> Result<Library, DatabaseError> {
        let mut clause = SetClause::new();
        if let Some(name) = &update.name {
            clause.set("name", validate::required_text("name", name, SHORT_TEXT)?);
        }
        if let Some(flag) = update.to_be_used {
            clause.set("to_be_used", i64::from(flag));
        }
        if clause.is_empty() {
            return self.get_library(id).await;
        }
        let (sql, params) = clause.into_update("libraries", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("library", id));
        }
        self.get_library(id).await
    }

    pub async fn delete_library(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("libraries", "library", id).await
    }
}
