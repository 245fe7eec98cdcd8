//! Equipment types.

use rig_core::entities::{EquipmentType, NewEquipmentType};
use rig_core::ids::PREFIX_EQUIPMENT_TYPE;
use rig_core::validate::{self, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::{SetClause, get_opt_string};
use crate::service::RigService;
use crate::updates::EquipmentTypeUpdate;

const COLUMNS: &str = "id, name, description, family";

fn row_to_equipment_type(row: &libsql::Row) -> Result<EquipmentType, DatabaseError> {
    Ok(EquipmentType {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        description: get_opt_string(row, 2)?,
        family: row.get::<String>(3)?,
    })
}

impl RigService {
    pub async fn create_equipment_type(
        &self,
        input: &NewEquipmentType,
    ) -> Result<EquipmentType, DatabaseError> {
        let name = validate::required_text("name", &input.name, SHORT_TEXT)?;
        let description =
            validate::optional_text("description", input.description.as_deref(), SHORT_TEXT)?;
        let family = validate::required_text("family", &input.family, SHORT_TEXT)?;

        let id = self.db().generate_id(PREFIX_EQUIPMENT_TYPE).await?;
        self.db()
            .execute(
                "INSERT INTO equipment_types (id, name, description, family) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), name, description, family],
            )
            .await?;
        self.get_equipment_type(&id).await
    }

    pub async fn get_equipment_type(&self, id: &str) -> Result<EquipmentType, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {COLUMNS} FROM equipment_types WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("equipment type", id))?;
        row_to_equipment_type(&row)
    }

    pub async fn list_equipment_types(&self) -> Result<Vec<EquipmentType>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {COLUMNS} FROM equipment_types ORDER BY family, name, id"),
                (),
            )
            .await?;
        let mut types = Vec::new();
        while let Some(row) = rows.next().await? {
            types.push(row_to_equipment_type(&row)?);
        }
        Ok(types)
    }

    pub async fn update_equipment_type(
        &self,
        id: &str,
        update: &EquipmentTypeUpdate,
    ) -> Result<EquipmentType, DatabaseError> {
        let mut clause = SetClause::new();
        if let Some(name) = &update.name {
            clause.set("name", validate::required_text("name", name, SHORT_TEXT)?);
        }
        if let Some(description) = &update.description {
            clause.set(
                "description",
                validate::optional_text("description", description.as_deref(), SHORT_TEXT)?,
            );
        }
        if let Some(family) = &update.family {
            clause.set("family", validate::required_text("family", family, SHORT_TEXT)?);
        }
        if clause.is_empty() {
            return self.get_equipment_type(id).await;
        }
        let (sql, params) = clause.into_update("equipment_types", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("equipment type", id));
        }
        self.get_equipment_type(id).await
    }

    pub async fn delete_equipment_type(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("equipment_types", "equipment type", id).await
    }
}
