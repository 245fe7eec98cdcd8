//! Equipment rows and their bindings.

use rig_core::entities::{Equipment, NewEquipment};
use rig_core::ids::PREFIX_EQUIPMENT;
use rig_core::validate::{self, LONG_TEXT, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::{SetClause, get_opt_bool, get_opt_string};
use crate::service::RigService;
use crate::updates::EquipmentUpdate;

const COLUMNS: &str = "id, name, type_id, net_id, virtual_id, location_id, scope_id, lib_id, \
                       brand_id, owner, in_use, description, note";

fn row_to_equipment(row: &libsql::Row) -> Result<Equipment, DatabaseError> {
    Ok(Equipment {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        type_id: row.get::<String>(2)?,
        net_id: row.get::<String>(3)?,
        virtual_id: row.get::<i64>(4)?,
        location_id: row.get::<String>(5)?,
        scope_id: row.get::<String>(6)?,
        lib_id: row.get::<String>(7)?,
        brand_id: get_opt_string(row, 8)?,
        owner: get_opt_string(row, 9)?,
        in_use: get_opt_bool(row, 10)?,
        description: get_opt_string(row, 11)?,
        note: get_opt_string(row, 12)?,
    })
}

impl RigService {
    pub async fn create_equipment(&self, input: &NewEquipment) -> Result<Equipment, DatabaseError> {
        let name = validate::required_text("name", &input.name, SHORT_TEXT)?;
        let virtual_id = validate::non_negative("virtual_id", input.virtual_id)?;
        let owner = validate::optional_text("owner", input.owner.as_deref(), SHORT_TEXT)?;
        let description =
            validate::optional_text("description", input.description.as_deref(), LONG_TEXT)?;
        let note = validate::optional_text("note", input.note.as_deref(), LONG_TEXT)?;

        self.ensure_exists("equipment_types", "type_id", &input.type_id)
            .await?;
        self.ensure_exists("locations", "location_id", &input.location_id)
            .await?;
        self.ensure_exists("scopes", "scope_id", &input.scope_id)
            .await?;
        self.ensure_exists("libraries", "lib_id", &input.lib_id)
            .await?;
        if let Some(brand_id) = &input.brand_id {
            self.ensure_exists("brands", "brand_id", brand_id).await?;
        }
        self.ensure_network_unbound(&input.net_id, None).await?;

        let id = self.db().generate_id(PREFIX_EQUIPMENT).await?;
        self.db()
            .execute(
                &format!("INSERT INTO equipment ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"),
                libsql::params![
                    id.as_str(),
                    name,
                    input.type_id.as_str(),
                    input.net_id.as_str(),
                    virtual_id,
                    input.location_id.as_str(),
                    input.scope_id.as_str(),
                    input.lib_id.as_str(),
                    input.brand_id.clone(),
                    owner,
                    input.in_use.map(i64::from),
                    description,
                    note
                ],
            )
            .await?;
        tracing::debug!(%id, net_id = %input.net_id, "equipment created");
        self.get_equipment(&id).await
    }

    pub async fn get_equipment(&self, id: &str) -> Result<Equipment, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM equipment WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("equipment", id))?;
        row_to_equipment(&row)
    }

    pub async fn list_equipment(&self) -> Result<Vec<Equipment>, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM equipment ORDER BY name, id"), ())
            .await?;
        let mut equipment = Vec::new();
        while let Some(row) = rows.next().await? {
            equipment.push(row_to_equipment(&row)?);
        }
        Ok(equipment)
    }

    pub async fn update_equipment(
        &self,
        id: &str,
        update: &EquipmentUpdate,
    ) -> Result<Equipment, DatabaseError> {
        let mut clause = SetClause::new();
        if let Some(name) = &update.name {
            clause.set("name", validate::required_text("name", name, SHORT_TEXT)?);
        }
        let references = [
            ("type_id", "equipment_types", &update.type_id),
            ("location_id", "locations", &update.location_id),
            ("scope_id", "scopes", &update.scope_id),
            ("lib_id", "libraries", &update.lib_id),
        ];
        for (column, table, value) in references {
            if let Some(target) = value {
                self.ensure_exists(table, column, target).await?;
                clause.set(column, target.as_str());
            }
        }
        if let Some(net_id) = &update.net_id {
            self.ensure_network_unbound(net_id, Some(id)).await?;
            clause.set("net_id", net_id.as_str());
        }
        if let Some(virtual_id) = update.virtual_id {
            clause.set("virtual_id", validate::non_negative("virtual_id", virtual_id)?);
        }
        if let Some(brand_id) = &update.brand_id {
            if let Some(target) = brand_id {
                self.ensure_exists("brands", "brand_id", target).await?;
            }
            clause.set("brand_id", brand_id.clone());
        }
        if let Some(owner) = &update.owner {
            clause.set(
                "owner",
                validate::optional_text("owner", owner.as_deref(), SHORT_TEXT)?,
            );
        }
        if let Some(in_use) = update.in_use {
            clause.set("in_use", in_use.map(i64::from));
        }
        if let Some(description) = &update.description {
            clause.set(
                "description",
                validate::optional_text("description", description.as_deref(), LONG_TEXT)?,
            );
        }
        if let Some(note) = &update.note {
            clause.set(
                "note",
                validate::optional_text("note", note.as_deref(), LONG_TEXT)?,
            );
        }
        if clause.is_empty() {
            return self.get_equipment(id).await;
        }
        let (sql, params) = clause.into_update("equipment", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("equipment", id));
        }
        self.get_equipment(id).await
    }

    /// Delete an equipment row together with its credentials.
    pub async fn delete_equipment(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("equipment", "equipment", id).await
    }

    /// The network must exist and not be bound to an equipment other than `except`.
    async fn ensure_network_unbound(
        &self,
        net_id: &str,
        except: Option<&str>,
    ) -> Result<(), DatabaseError> {
        self.ensure_exists("networks", "net_id", net_id).await?;
        let mut rows = self
            .db()
            .query(
                "SELECT id FROM equipment WHERE net_id = ?1 AND id IS NOT ?2",
                libsql::params![net_id, except],
            )
            .await?;
        if let Some(row) = rows.next().await? {
            let holder = row.get::<String>(0)?;
            return Err(DatabaseError::Validation(format!(
                "net_id: network '{net_id}' is already bound to equipment '{holder}'"
            )));
        }
        Ok(())
    }
}
