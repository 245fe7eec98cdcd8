//! Test scopes.

use rig_core::entities::Scope;
use rig_core::ids::PREFIX_SCOPE;
use rig_core::validate::{self, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::SetClause;
use crate::service::RigService;
use crate::updates::ScopeUpdate;

fn row_to_scope(row: &libsql::Row) -> Result<Scope, DatabaseError> {
    Ok(Scope {
        id: row.get::<String>(0)?,
        description: row.get::<String>(1)?,
    })
}

impl RigService {
    pub async fn create_scope(&self, description: &str) -> Result<Scope, DatabaseError> {
        let description = validate::required_text("description", description, SHORT_TEXT)?;
        let id = self.db().generate_id(PREFIX_SCOPE).await?;
        self.db()
            .execute(
                "INSERT INTO scopes (id, description) VALUES (?1, ?2)",
                libsql::params![id.as_str(), description],
            )
            .await?;
        self.get_scope(&id).await
    }

    pub async fn get_scope(&self, id: &str) -> Result<Scope, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT id, description FROM scopes WHERE id = ?1", [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("scope", id))?;
        row_to_scope(&row)
    }

    pub async fn list_scopes(&self) -> Result<Vec<Scope>, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT id, description FROM scopes ORDER BY description, id", ())
            .await?;
        let mut scopes = Vec::new();
        while let Some(row) = rows.next().await? {
            scopes.push(row_to_scope(&row)?);
        }
        Ok(scopes)
    }

    pub async fn update_scope(
        &self,
        id: &str,
        update: &ScopeUpdate,
    ) -> Result<Scope, DatabaseError> {
        let mut clause = SetClause::new();
        if let Some(description) = &update.description {
            clause.set(
                "description",
                validate::required_text("description", description, SHORT_TEXT)?,
            );
        }
        if clause.is_empty() {
            return self.get_scope(id).await;
        }
        let (sql, params) = clause.into_update("scopes", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("scope", id));
        }
        self.get_scope(id).await
    }

    pub async fn delete_scope(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("scopes", "scope", id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::test_support::helpers::test_service;
    use crate::updates::ScopeUpdate;

    #[tokio::test]
    async fn create_update_delete() {
        let svc = test_service().await;
        let scope = svc.create_scope("regression").await.unwrap();
        assert!(scope.id.starts_with("scp-"));

        let updated = svc
            .update_scope(&scope.id, &ScopeUpdate { description: Some("soak".into()) })
            .await
            .unwrap();
        assert_eq!(updated.description, "soak");

        svc.delete_scope(&scope.id).await.unwrap();
        assert!(svc.list_scopes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_update_is_rejected() {
        let svc = test_service().await;
        let scope = svc.create_scope("regression").await.unwrap();
        let err = svc
            .update_scope(&scope.id, &ScopeUpdate { description: Some(" ".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }
}
