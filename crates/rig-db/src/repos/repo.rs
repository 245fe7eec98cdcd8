//! Mirrored repository records.

use chrono::Utc;
use rig_core::entities::MirroredRepo;
use rig_core::ids::PREFIX_REPO;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_optional_datetime};
use crate::service::RigService;

const COLUMNS: &str = "id, name, url, branch, local_path, last_synced_at, created_at";

fn row_to_repo(row: &libsql::Row) -> Result<MirroredRepo, DatabaseError> {
    let last_synced = row.get::<Option<String>>(5)?;
    Ok(MirroredRepo {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        url: row.get::<String>(2)?,
        branch: row.get::<String>(3)?,
        local_path: row.get::<String>(4)?,
        last_synced_at: parse_optional_datetime(last_synced.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl RigService {
    /// Insert the record for `name`, or update branch and local path of the
    /// existing one. The URL of an existing record is kept.
    ///
    /// With `stamp` the sync timestamp is set to now; without it an existing
    /// timestamp is left alone.
    pub async fn upsert_repo(
        &self,
        name: &str,
        url: &str,
        branch: &str,
        local_path: &str,
        stamp: bool,
    ) -> Result<MirroredRepo, DatabaseError> {
        let id = self.db().generate_id(PREFIX_REPO).await?;
        let synced_at = stamp.then(|| Utc::now().to_rfc3339());
        self.db()
            .execute(
                "INSERT INTO repos (id, name, url, branch, local_path, last_synced_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(name) DO UPDATE SET
                   branch = excluded.branch,
                   local_path = excluded.local_path,
                   last_synced_at = COALESCE(excluded.last_synced_at, repos.last_synced_at)",
                libsql::params![
                    id.as_str(),
                    name,
                    url,
                    branch,
                    local_path,
                    synced_at,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        self.find_repo_by_name(name)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Set the sync timestamp of `id` to now.
    pub async fn mark_repo_synced(&self, id: &str) -> Result<MirroredRepo, DatabaseError> {
        let affected = self
            .db()
            .execute(
                "UPDATE repos SET last_synced_at = ?1 WHERE id = ?2",
                libsql::params![Utc::now().to_rfc3339(), id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("repo", id));
        }
        self.get_repo(id).await
    }

    pub async fn get_repo(&self, id: &str) -> Result<MirroredRepo, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM repos WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("repo", id))?;
        row_to_repo(&row)
    }

    pub async fn find_repo_by_name(&self, name: &str) -> Result<Option<MirroredRepo>, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM repos WHERE name = ?1"), [name])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_repo(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_repos(&self) -> Result<Vec<MirroredRepo>, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM repos ORDER BY name"), ())
            .await?;
        let mut repos = Vec::new();
        while let Some(row) = rows.next().await? {
            repos.push(row_to_repo(&row)?);
        }
        Ok(repos)
    }
}
