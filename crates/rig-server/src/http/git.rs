//! Catalog routes: sync, repository records, and cataloged scripts.

use std::path::PathBuf;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use rig_core::entities::{CatalogedScript, MirroredRepo};
use rig_core::responses::{FileContent, SyncResponse};
use rig_db::repos::ScriptFilter;
use rig_files::Confinement;
use serde::Deserialize;

use super::{ApiError, ApiJson, ApiQuery, blocking};
use crate::context::SharedContext;

pub fn routes() -> Router<SharedContext> {
    Router::new()
        .route("/git/sync", post(sync))
        .route("/git/repos", get(list_repos))
        .route("/git/dirs", get(list_dirs))
        .route("/git/scripts", get(list_scripts))
        .route("/git/scripts/:id/content", get(script_content))
}

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SyncBody {
    name: String,
    url: String,
    #[serde(default = "default_branch")]
    branch: String,
}

async fn sync(
    State(ctx): State<SharedContext>,
    ApiJson(body): ApiJson<SyncBody>,
) -> Result<Json<SyncResponse>, ApiError> {
    let outcome = ctx
        .mirrors
        .sync_repository(&ctx.service, &body.name, &body.url, &body.branch)
        .await?;
    tracing::info!(
        repo = %outcome.repo.name,
        action = %outcome.action,
        scripts = outcome.scripts.len(),
        "repository synced"
    );
    Ok(Json(outcome.into_response()))
}

async fn list_repos(State(ctx): State<SharedContext>) -> Result<Json<Vec<MirroredRepo>>, ApiError> {
    Ok(Json(ctx.service.list_repos().await?))
}

#[derive(Debug, Deserialize)]
struct DirsQuery {
    repo_id: String,
}

async fn list_dirs(
    State(ctx): State<SharedContext>,
    ApiQuery(query): ApiQuery<DirsQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let repo = ctx.service.get_repo(&query.repo_id).await?;
    Ok(Json(ctx.service.list_script_dirs(&repo).await?))
}

#[derive(Debug, Deserialize)]
struct ScriptsQuery {
    repo_id: Option<String>,
    /// Relative to the mirror root.
    dir: Option<String>,
}

async fn list_scripts(
    State(ctx): State<SharedContext>,
    ApiQuery(query): ApiQuery<ScriptsQuery>,
) -> Result<Json<Vec<CatalogedScript>>, ApiError> {
    let dir = match (&query.repo_id, query.dir) {
        (None, Some(_)) => {
            return Err(ApiError::Validation("dir: requires repo_id".to_string()));
        }
        (Some(repo_id), Some(dir)) => {
            let repo = ctx.service.get_repo(repo_id).await?;
            let root = PathBuf::from(repo.local_path);
            let abs = blocking(move || Confinement::new(&root)?.resolve(&dir)).await?;
            Some(abs.to_string_lossy().into_owned())
        }
        (_, None) => None,
    };
    let filter = ScriptFilter {
        repo_id: query.repo_id,
        dir,
    };
    Ok(Json(ctx.service.list_scripts(&filter).await?))
}

async fn script_content(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
) -> Result<Json<FileContent>, ApiError> {
    let script = ctx.service.get_script(&id).await?;
    let repo = ctx.service.get_repo(&script.repo_id).await?;
    let content = blocking(move || {
        ctx.files
            .read_absolute(&PathBuf::from(repo.local_path), &PathBuf::from(script.path))
    })
    .await?;
    Ok(Json(content))
}
