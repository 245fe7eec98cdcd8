//! HTTP API: one router per resource family, merged over a shared context.

mod auth;
mod error;
mod fs;
mod git;
mod inventory;

use anyhow::Context;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::routing::get;
use axum::{Json, Router};
use rig_files::FilesError;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::context::SharedContext;

pub use auth::{MaybeIdentity, RequireIdentity};
pub use error::ApiError;

/// Build the full API router over `ctx`.
pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(auth::routes())
        .merge(git::routes())
        .merge(fs::routes())
        .merge(inventory::routes())
        .with_state(ctx)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(ctx: SharedContext, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("listener has no local address")?;
    tracing::info!(addr = %local, "rig API listening");
    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn root() -> Json<Value> {
    Json(json!({ "msg": "rig API is running" }))
}

/// JSON body whose rejections are reported as validation errors.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string whose rejections are reported as validation errors.
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Run filesystem work off the async runtime.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, FilesError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}
