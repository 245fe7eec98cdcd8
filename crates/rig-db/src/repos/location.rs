//! Physical lab locations.

use rig_core::entities::{Location, NewLocation};
use rig_core::ids::PREFIX_LOCATION;
use rig_core::validate::{self, RACK_TEXT, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::{SetClause, get_opt_string};
use crate::service::RigService;
use crate::updates::LocationUpdate;

// `row` is an SQL keyword; the column is stored as `row_label`.
const COLUMNS: &str = "id, site, room, row_label, rack, pos";

fn row_to_location(row: &libsql::Row) -> Result<Location, DatabaseError> {
    Ok(Location {
        id: row.get::<String>(0)?,
        site: get_opt_string(row, 1)?,
        room: get_opt_string(row, 2)?,
        row: get_opt_string(row, 3)?,
        rack: get_opt_string(row, 4)?,
        pos: row.get::<Option<i64>>(5)?,
    })
}

fn checked_pos(pos: Option<i64>) -> Result<Option<i64>, DatabaseError> {
    Ok(pos
        .map(|p| validate::non_negative("pos", p))
        .transpose()?)
}

impl RigService {
    pub async fn create_location(&self, input: &NewLocation) -> Result<Location, DatabaseError> {
        let site = validate::optional_text("site", input.site.as_deref(), SHORT_TEXT)?;
        let room = validate::optional_text("room", input.room.as_deref(), SHORT_TEXT)?;
        let row = validate::optional_text("row", input.row.as_deref(), SHORT_TEXT)?;
        let rack = validate::optional_text("rack", input.rack.as_deref(), RACK_TEXT)?;
        let pos = checked_pos(input.pos)?;

        let id = self.db().generate_id(PREFIX_LOCATION).await?;
        self.db()
            .execute(
                "INSERT INTO locations (id, site, room, row_label, rack, pos)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![id.as_str(), site, room, row, rack, pos],
            )
            .await?;
        self.get_location(&id).await
    }

    pub async fn get_location(&self, id: &str) -> Result<Location, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM locations WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("location", id))?;
        row_to_location(&row)
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {COLUMNS} FROM locations ORDER BY site, room, row_label, rack, pos, id"),
                (),
            )
            .await?;
        let mut locations = Vec::new();
        while let Some(row) = rows.next().await? {
            locations.push(row_to_location(&row)?);
        }
        Ok(locations)
    }

    pub async fn update_location(
        &self,
        id: &str,
        update: &LocationUpdate,
    ) -> Result<Location, DatabaseError> {
        let mut clause = SetClause::new();
        let text_fields = [
            ("site", "site", &update.site, SHORT_TEXT),
            ("room", "room", &update.room, SHORT_TEXT),
            ("row", "row_label", &update.row, SHORT_TEXT),
            ("rack", "rack", &update.rack, RACK_TEXT),
        ];
        for (field, column, value, max) in text_fields {
            if let Some(value) = value {
                clause.set(column, validate::optional_text(field, value.as_deref(), max)?);
            }
        }
        if let Some(pos) = update.pos {
            clause.set("pos", checked_pos(pos)?);
        }
        if clause.is_empty() {
            return self.get_location(id).await;
        }
        let (sql, params) = clause.into_update("locations", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("location", id));
        }
        self.get_location(id).await
    }

    pub async fn delete_location(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("locations", "location", id).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rig_core::entities::NewLocation;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::test_service;
    use crate::updates::LocationUpdate;

    #[tokio::test]
    async fn all_coordinates_optional() {
        let svc = test_service().await;
        let loc = svc.create_location(&NewLocation::default()).await.unwrap();
        assert!(loc.id.starts_with("loc-"));
        assert_eq!(loc.site, None);
        assert_eq!(loc.pos, None);
    }

    #[tokio::test]
    async fn row_column_roundtrips() {
        let svc = test_service().await;
        let loc = svc
            .create_location(&NewLocation {
                site: Some("lab-a".into()),
                row: Some("3".into()),
                rack: Some("R12".into()),
                pos: Some(7),
                ..NewLocation::default()
            })
            .await
            .unwrap();
        assert_eq!(loc.row.as_deref(), Some("3"));

        let moved = svc
            .update_location(
                &loc.id,
                &LocationUpdate {
                    rack: Some(None),
                    pos: Some(Some(8)),
                    ..LocationUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.rack, None);
        assert_eq!(moved.pos, Some(8));
        assert_eq!(moved.row.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn rack_is_five_characters_at_most() {
        let svc = test_service().await;
        let err = svc
            .create_location(&NewLocation {
                rack: Some("RACK-12".into()),
                ..NewLocation::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(ref m) if m.starts_with("rack")));
    }

    #[tokio::test]
    async fn negative_position_is_rejected() {
        let svc = test_service().await;
        let err = svc
            .create_location(&NewLocation {
                pos: Some(-1),
                ..NewLocation::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }
}
