//! Equipment brands.

use rig_core::entities::Brand;
use rig_core::ids::PREFIX_BRAND;
use rig_core::validate::{self, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::SetClause;
use crate::service::RigService;
use crate::updates::BrandUpdate;

fn row_to_brand(row: &libsql::Row) -> Result<Brand, DatabaseError> {
    Ok(Brand {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
    })
}

impl RigService {
    pub async fn create_brand(&self, name: &str) -> Result<Brand, DatabaseError> {
        let name = validate::required_text("name", name, SHORT_TEXT)?;
        let id = self.db().generate_id(PREFIX_BRAND).await?;
        self.db()
            .execute(
                "INSERT INTO brands (id, name) VALUES (?1, ?2)",
                libsql::params![id.as_str(), name],
            )
            .await?;
        self.get_brand(&id).await
    }

    pub async fn get_brand(&self, id: &str) -> Result<Brand, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT id, name FROM brands WHERE id = ?1", [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("brand", id))?;
        row_to_brand(&row)
    }

    pub async fn list_brands(&self) -> Result<Vec<Brand>, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT id, name FROM brands ORDER BY name, id", ())
            .await?;
        let mut brands = Vec::new();
        while let Some(row) = rows.next().await? {
            brands.push(row_to_brand(&row)?);
        }
        Ok(brands)
    }

    pub async fn update_brand(
        &self,
        id: &str,
        update: &BrandUpdate,
    ) -> Result<Brand, DatabaseError> {
        let mut clause = SetClause::new();
        if let Some(name) = &update.name {
            clause.set("name", validate::required_text("name", name, SHORT_TEXT)?);
        }
        if clause.is_empty() {
            return self.get_brand(id).await;
        }
        let (sql, params) = clause.into_update("brands", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("brand", id));
        }
        self.get_brand(id).await
    }

    /// Fails with a validation error while equipment still references the brand.
    pub async fn delete_brand(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("brands", "brand", id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::test_support::helpers::test_service;
    use crate::updates::BrandUpdate;

    #[tokio::test]
    async fn crud_cycle() {
        let svc = test_service().await;
        let brand = svc.create_brand("  Acme ").await.unwrap();
        assert!(brand.id.starts_with("brd-"));
        assert_eq!(brand.name, "Acme");

        let renamed = svc
            .update_brand(&brand.id, &BrandUpdate { name: Some("Initech".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.name, "Initech");
        assert_eq!(svc.list_brands().await.unwrap(), vec![renamed]);

        svc.delete_brand(&brand.id).await.unwrap();
        let err = svc.get_brand(&brand.id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let svc = test_service().await;
        let err = svc.create_brand("   ").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_update_returns_current_row() {
        let svc = test_service().await;
        let brand = svc.create_brand("Acme").await.unwrap();
        let same = svc
            .update_brand(&brand.id, &BrandUpdate::default())
            .await
            .unwrap();
        assert_eq!(same, brand);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .update_brand("brd-00000000", &BrandUpdate { name: Some("X".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
        assert!(matches!(
            svc.delete_brand("brd-00000000").await.unwrap_err(),
            DatabaseError::NotFound { .. }
        ));
    }
}
