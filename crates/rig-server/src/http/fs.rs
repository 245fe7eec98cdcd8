//! Live filesystem routes over the mirrors, plus suite storage.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rig_core::entities::SuiteSummary;
use rig_core::responses::{
    CheckoutResponse, DirEntry, FileContent, FileMetadata, SuiteSaveResponse, SuiteScriptResponse,
};
use rig_files::SuiteScope;
use serde::Deserialize;

use super::{ApiError, ApiJson, ApiQuery, MaybeIdentity, blocking};
use crate::context::SharedContext;

pub fn routes() -> Router<SharedContext> {
    Router::new()
        .route("/git/fs/repos", get(list_repos))
        .route("/git/fs/list", get(list_dir))
        .route("/git/fs/file", get(read_file))
        .route("/git/fs/meta", get(file_metadata))
        .route("/git/fs/meta-dir", get(dir_metadata))
        .route("/git/fs/checkout", post(checkout))
        .route("/git/fs/suites", post(save_suite).get(list_suites))
        .route("/git/fs/suite-file", get(suite_file))
}

#[derive(Debug, Deserialize)]
struct RepoPath {
    repo: String,
    #[serde(default)]
    path: String,
}

fn scope_of(identity: MaybeIdentity) -> SuiteScope {
    SuiteScope::from_subject(identity.0.map(|id| id.subject))
}

async fn list_repos(State(ctx): State<SharedContext>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(blocking(move || ctx.files.list_repos()).await?))
}

async fn list_dir(
    State(ctx): State<SharedContext>,
    ApiQuery(q): ApiQuery<RepoPath>,
) -> Result<Json<Vec<DirEntry>>, ApiError> {
    Ok(Json(blocking(move || ctx.files.list_dir(&q.repo, &q.path)).await?))
}

async fn read_file(
    State(ctx): State<SharedContext>,
    ApiQuery(q): ApiQuery<RepoPath>,
) -> Result<Json<FileContent>, ApiError> {
    Ok(Json(blocking(move || ctx.files.read_file(&q.repo, &q.path)).await?))
}

async fn file_metadata(
    State(ctx): State<SharedContext>,
    ApiQuery(q): ApiQuery<RepoPath>,
) -> Result<Json<FileMetadata>, ApiError> {
    Ok(Json(blocking(move || ctx.files.file_metadata(&q.repo, &q.path)).await?))
}

async fn dir_metadata(
    State(ctx): State<SharedContext>,
    ApiQuery(q): ApiQuery<RepoPath>,
) -> Result<Json<Vec<FileMetadata>>, ApiError> {
    Ok(Json(blocking(move || ctx.files.dir_metadata(&q.repo, &q.path)).await?))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckoutBody {
    branch: String,
}

async fn checkout(
    State(ctx): State<SharedContext>,
    ApiJson(body): ApiJson<CheckoutBody>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    Ok(Json(ctx.mirrors.checkout_current(&body.branch).await?))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SaveSuiteBody {
    repo: String,
    name: String,
    files: Vec<String>,
}

async fn save_suite(
    State(ctx): State<SharedContext>,
    identity: MaybeIdentity,
    ApiJson(body): ApiJson<SaveSuiteBody>,
) -> Result<(StatusCode, Json<SuiteSaveResponse>), ApiError> {
    let scope = scope_of(identity);
    let saved = blocking(move || ctx.suites.save(&scope, &body.repo, &body.name, &body.files)).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[derive(Debug, Deserialize)]
struct SuitesQuery {
    repo: String,
}

async fn list_suites(
    State(ctx): State<SharedContext>,
    identity: MaybeIdentity,
    ApiQuery(q): ApiQuery<SuitesQuery>,
) -> Result<Json<Vec<SuiteSummary>>, ApiError> {
    let scope = scope_of(identity);
    Ok(Json(blocking(move || ctx.suites.list(&scope, &q.repo)).await?))
}

#[derive(Debug, Deserialize)]
struct SuiteFileQuery {
    repo: String,
    name: String,
}

async fn suite_file(
    State(ctx): State<SharedContext>,
    identity: MaybeIdentity,
    ApiQuery(q): ApiQuery<SuiteFileQuery>,
) -> Result<Json<SuiteScriptResponse>, ApiError> {
    let scope = scope_of(identity);
    Ok(Json(
        blocking(move || ctx.suites.runner_script(&scope, &q.repo, &q.name)).await?,
    ))
}
