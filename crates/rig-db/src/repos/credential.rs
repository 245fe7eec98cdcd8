//! Equipment credentials.

use rig_core::entities::{Credential, NewCredential};
use rig_core::ids::PREFIX_CREDENTIAL;
use rig_core::validate::{self, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::{SetClause, get_opt_string};
use crate::service::RigService;
use crate::updates::CredentialUpdate;

const COLUMNS: &str = "id, cred_type_id, equipment_id, username, password, port";

fn row_to_credential(row: &libsql::Row) -> Result<Credential, DatabaseError> {
    Ok(Credential {
        id: row.get::<String>(0)?,
        cred_type_id: row.get::<String>(1)?,
        equipment_id: row.get::<String>(2)?,
        username: get_opt_string(row, 3)?,
        password: get_opt_string(row, 4)?,
        port: row.get::<Option<i64>>(5)?,
    })
}

fn checked_port(port: Option<i64>) -> Result<Option<i64>, DatabaseError> {
    Ok(port.map(|p| validate::port("port", p)).transpose()?)
}

impl RigService {
    pub async fn create_credential(
        &self,
        input: &NewCredential,
    ) -> Result<Credential, DatabaseError> {
        let username = validate::optional_text("username", input.username.as_deref(), SHORT_TEXT)?;
        let password = validate::optional_text("password", input.password.as_deref(), SHORT_TEXT)?;
        let port = checked_port(input.port)?;

        self.ensure_exists("credential_types", "cred_type_id", &input.cred_type_id)
            .await?;
        self.ensure_exists("equipment", "equipment_id", &input.equipment_id)
            .await?;

        let id = self.db().generate_id(PREFIX_CREDENTIAL).await?;
        self.db()
            .execute(
                &format!("INSERT INTO credentials ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    input.cred_type_id.as_str(),
                    input.equipment_id.as_str(),
                    username,
                    password,
                    port
                ],
            )
            .await?;
        self.get_credential(&id).await
    }

    pub async fn get_credential(&self, id: &str) -> Result<Credential, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM credentials WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("credential", id))?;
        row_to_credential(&row)
    }

    /// List credentials, optionally only those of one equipment.
    pub async fn list_credentials(
        &self,
        equipment_id: Option<&str>,
    ) -> Result<Vec<Credential>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {COLUMNS} FROM credentials
                     WHERE ?1 IS NULL OR equipment_id = ?1
                     ORDER BY equipment_id, id"
                ),
                libsql::params![equipment_id],
            )
            .await?;
        let mut credentials = Vec::new();
        while let Some(row) = rows.next().await? {
            credentials.push(row_to_credential(&row)?);
        }
        Ok(credentials)
    }

    pub async fn update_credential(
        &self,
        id: &str,
        update: &CredentialUpdate,
    ) -> Result<Credential, DatabaseError> {
        let mut clause = SetClause::new();
        if let Some(cred_type_id) = &update.cred_type_id {
            self.ensure_exists("credential_types", "cred_type_id", cred_type_id)
                .await?;
            clause.set("cred_type_id", cred_type_id.as_str());
        }
        if let Some(equipment_id) = &update.equipment_id {
            self.ensure_exists("equipment", "equipment_id", equipment_id)
                .await?;
            clause.set("equipment_id", equipment_id.as_str());
        }
        if let Some(username) = &update.username {
            clause.set(
                "username",
                validate::optional_text("username", username.as_deref(), SHORT_TEXT)?,
            );
        }
        if let Some(password) = &update.password {
            clause.set(
                "password",
                validate::optional_text("password", password.as_deref(), SHORT_TEXT)?,
            );
        }
        if let Some(port) = update.port {
            clause.set("port", checked_port(port)?);
        }
        if clause.is_empty() {
            return self.get_credential(id).await;
        }
        let (sql, params) = clause.into_update("credentials", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("credential", id));
        }
        self.get_credential(id).await
    }

    pub async fn delete_credential(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("credentials", "credential", id).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rig_core::entities::NewCredential;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::{test_credential_type, test_equipment, test_service};
    use crate::updates::CredentialUpdateBuilder;

    fn ssh_login(cred_type_id: &str, equipment_id: &str) -> NewCredential {
        NewCredential {
            cred_type_id: cred_type_id.into(),
            equipment_id: equipment_id.into(),
            username: Some("admin".into()),
            password: Some("secret".into()),
            port: Some(22),
        }
    }

    #[tokio::test]
    async fn create_and_filter_by_equipment() {
        let svc = test_service().await;
        let ctype = test_credential_type(&svc).await;
        let a = test_equipment(&svc, "10.0.0.1").await;
        let b = test_equipment(&svc, "10.0.0.2").await;

        let cred = svc
            .create_credential(&ssh_login(&ctype.id, &a.id))
            .await
            .unwrap();
        svc.create_credential(&ssh_login(&ctype.id, &b.id))
            .await
            .unwrap();

        assert!(cred.id.starts_with("crd-"));
        assert_eq!(svc.list_credentials(None).await.unwrap().len(), 2);
        assert_eq!(svc.list_credentials(Some(&a.id)).await.unwrap(), vec![cred]);
    }

    #[tokio::test]
    async fn requires_existing_type_and_equipment() {
        let svc = test_service().await;
        let ctype = test_credential_type(&svc).await;
        let err = svc
            .create_credential(&ssh_login(&ctype.id, "eqp-00000000"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(ref m) if m.contains("equipment_id")));

        let equipment = test_equipment(&svc, "10.0.0.1").await;
        let err = svc
            .create_credential(&ssh_login("ctp-00000000", &equipment.id))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(ref m) if m.contains("cred_type_id")));
    }

    #[tokio::test]
    async fn invalid_port_is_rejected() {
        let svc = test_service().await;
        let ctype = test_credential_type(&svc).await;
        let equipment = test_equipment(&svc, "10.0.0.1").await;
        let mut input = ssh_login(&ctype.id, &equipment.id);
        input.port = Some(0);
        assert!(matches!(
            svc.create_credential(&input).await.unwrap_err(),
            DatabaseError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn deleting_equipment_removes_its_credentials() {
        let svc = test_service().await;
        let ctype = test_credential_type(&svc).await;
        let equipment = test_equipment(&svc, "10.0.0.1").await;
        let cred = svc
            .create_credential(&ssh_login(&ctype.id, &equipment.id))
            .await
            .unwrap();

        svc.delete_equipment(&equipment.id).await.unwrap();
        assert!(matches!(
            svc.get_credential(&cred.id).await.unwrap_err(),
            DatabaseError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn patch_clears_password_only() {
        let svc = test_service().await;
        let ctype = test_credential_type(&svc).await;
        let equipment = test_equipment(&svc, "10.0.0.1").await;
        let cred = svc
            .create_credential(&ssh_login(&ctype.id, &equipment.id))
            .await
            .unwrap();
        let updated = svc
            .update_credential(&cred.id, &CredentialUpdateBuilder::new().password(None).build())
            .await
            .unwrap();
        assert_eq!(updated.password, None);
        assert_eq!(updated.username.as_deref(), Some("admin"));
        assert_eq!(updated.port, Some(22));
    }
}
