//! Script catalog: one row per (repository, absolute file path).

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Utc;
use rig_core::entities::{CatalogedScript, FunctionDoc, MirroredRepo, ScriptMetadata};
use rig_core::ids::PREFIX_SCRIPT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::RigService;

const COLUMNS: &str = "id, repo_id, path, filename, module_doc, description, topology, author, \
                       functions_doc, last_commit, updated_at";

fn row_to_script(row: &libsql::Row) -> Result<CatalogedScript, DatabaseError> {
    let functions = match get_opt_string(row, 8)? {
        Some(json) => serde_json::from_str::<Vec<FunctionDoc>>(&json)
            .map_err(|e| DatabaseError::Query(format!("Invalid functions_doc JSON: {e}")))?,
        None => Vec::new(),
    };
    Ok(CatalogedScript {
        id: row.get::<String>(0)?,
        repo_id: row.get::<String>(1)?,
        path: row.get::<String>(2)?,
        filename: row.get::<String>(3)?,
        module_doc: get_opt_string(row, 4)?,
        description: get_opt_string(row, 5)?,
        topology: get_opt_string(row, 6)?,
        author: get_opt_string(row, 7)?,
        functions,
        last_commit: get_opt_string(row, 9)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default)]
pub struct ScriptFilter {
    pub repo_id: Option<String>,
    /// Absolute directory; only scripts at or below it match.
    pub dir: Option<String>,
}

impl RigService {
    /// Insert or overwrite the catalog row for `(repo_id, path)`.
    ///
    /// Every derived field is replaced; `last_commit` is left untouched.
    pub async fn upsert_script(
        &self,
        repo_id: &str,
        path: &str,
        filename: &str,
        metadata: &ScriptMetadata,
    ) -> Result<CatalogedScript, DatabaseError> {
        let id = self.db().generate_id(PREFIX_SCRIPT).await?;
        let functions = serde_json::to_string(&metadata.functions)
            .map_err(|e| DatabaseError::Other(e.into()))?;
        self.db()
            .execute(
                "INSERT INTO scripts (id, repo_id, path, filename, module_doc, description, topology,
                                      author, functions_doc, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(repo_id, path) DO UPDATE SET
                   filename = excluded.filename,
                   module_doc = excluded.module_doc,
                   description = excluded.description,
                   topology = excluded.topology,
                   author = excluded.author,
                   functions_doc = excluded.functions_doc,
                   updated_at = excluded.updated_at",
                libsql::params![
                    id.as_str(),
                    repo_id,
                    path,
                    filename,
                    metadata.module_doc.as_str(),
                    metadata.description.as_deref(),
                    metadata.topology.as_deref(),
                    metadata.author.as_deref(),
                    functions,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;

        let mut rows = self
            .db()
            .query(
                &format!("SELECT {COLUMNS} FROM scripts WHERE repo_id = ?1 AND path = ?2"),
                libsql::params![repo_id, path],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_script(&row)
    }

    pub async fn get_script(&self, id: &str) -> Result<CatalogedScript, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM scripts WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("script", id))?;
        row_to_script(&row)
    }

    /// List catalog rows ordered by path.
    ///
    /// The directory filter compares whole path segments, so `/r/sub` matches
    /// `/r/sub/x.py` but not `/r/subway/x.py`.
    pub async fn list_scripts(
        &self,
        filter: &ScriptFilter,
    ) -> Result<Vec<CatalogedScript>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(repo_id) = &filter.repo_id {
            params.push(repo_id.as_str().into());
            clauses.push(format!("repo_id = ?{}", params.len()));
        }
        if let Some(dir) = &filter.dir {
            let prefix = format!("{}/", dir.trim_end_matches('/'));
            let len = i64::try_from(prefix.chars().count())
                .map_err(|e| DatabaseError::Other(e.into()))?;
            params.push(prefix.into());
            let prefix_idx = params.len();
            params.push(len.into());
            clauses.push(format!("substr(path, 1, ?{}) = ?{prefix_idx}", params.len()));
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        let sql = format!("SELECT {COLUMNS} FROM scripts {where_sql} ORDER BY path");
        let mut rows = self.db().query(&sql, libsql::params_from_iter(params)).await?;

        let mut scripts = Vec::new();
        while let Some(row) = rows.next().await? {
            scripts.push(row_to_script(&row)?);
        }
        Ok(scripts)
    }

    pub async fn count_scripts(&self, repo_id: &str) -> Result<usize, DatabaseError> {
        let mut rows = self
            .db()
            .query("SELECT COUNT(*) FROM scripts WHERE repo_id = ?1", [repo_id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        usize::try_from(row.get::<i64>(0)?).map_err(|e| DatabaseError::Other(e.into()))
    }

    /// Distinct directories holding cataloged scripts, relative to the mirror
    /// root and sorted. The root itself is reported as `"."`.
    pub async fn list_script_dirs(&self, repo: &MirroredRepo) -> Result<Vec<String>, DatabaseError> {
        let filter = ScriptFilter {
            repo_id: Some(repo.id.clone()),
            dir: None,
        };
        let root = Path::new(&repo.local_path);
        let dirs: BTreeSet<String> = self
            .list_scripts(&filter)
            .await?
            .iter()
            .filter_map(|script| {
                let parent = Path::new(&script.path).parent()?;
                let rel = parent.strip_prefix(root).ok()?;
                let rel = rel.to_string_lossy().replace('\\', "/");
                Some(if rel.is_empty() { ".".to_string() } else { rel })
            })
            .collect();
        Ok(dirs.into_iter().collect())
    }

    /// Overwrite the header-derived fields of one row.
    pub async fn update_script_fields(
        &self,
        id: &str,
        description: Option<&str>,
        topology: Option<&str>,
        author: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .execute(
                "UPDATE scripts SET description = ?1, topology = ?2, author = ?3, updated_at = ?4
                 WHERE id = ?5",
                libsql::params![description, topology, author, Utc::now().to_rfc3339(), id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("script", id));
        }
        Ok(())
    }
}
