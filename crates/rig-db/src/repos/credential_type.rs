//! Credential types (ssh, telnet, snmp, ...).

use rig_core::entities::CredentialType;
use rig_core::ids::PREFIX_CREDENTIAL_TYPE;
use rig_core::validate::{self, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::SetClause;
use crate::service::RigService;
use crate::updates::CredentialTypeUpdate;

fn row_to_credential_type(row: &libsql::Row) -> Result<CredentialType, DatabaseError> {
    Ok(CredentialType {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
    })
}

impl RigService {
    pub async fn create_credential_type(&self, name: &str) -> Result<CredentialType, DatabaseError> {
        let name = validate::required_text("name", name, SHORT_TEXT)?;
        let id = self.db().generate_id(PREFIX_CREDENTIAL_TYPE).await?;
        self.db()
            .execute(
                "INSERT INTO credential_types (id, name) VALUES (?1, ?2)",
                libsql::params![id.as_str(), name],
            )
            .await?;
        self.get_credential_type(&id).await
    }

    pub async fn get_credential_type(&self, id: &str) -> Result<CredentialType, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT id, name FROM credential_types WHERE id = ?1", [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("credential type", id))?;
        row_to_credential_type(&row)
    }

    pub async fn list_credential_types(&self) -> Result<Vec<CredentialType>, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT id, name FROM credential_types ORDER BY name, id", ())
            .await?;
        let mut types = Vec::new();
        while let Some(row) = rows.next().await? {
            types.push(row_to_credential_type(&row)?);
        }
        Ok(types)
    }

    pub async fn update_credential_type(
        &self,
        id: &str,
        update: &CredentialTypeUpdate,
    ) -> Result<CredentialType, DatabaseError> {
        let mut clause = SetClause::new();
        if let Some(name) = &update.name {
            clause.set("name", validate::required_text("name", name, SHORT_TEXT)?);
        }
        if clause.is_empty() {
            return self.get_credential_type(id).await;
        }
        let (sql, params) = clause.into_update("credential_types", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("credential type", id));
        }
        self.get_credential_type(id).await
    }

    pub async fn delete_credential_type(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("credential_types", "credential type", id)
            .await
    }
}
