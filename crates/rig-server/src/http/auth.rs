//! Account routes and the bearer-token extractors.

use axum::extract::{FromRequest, FromRequestParts, Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use rig_auth::{AuthError, hash_password, parse_bearer, verify_password};
use rig_core::entities::User;
use rig_core::enums::UserRole;
use rig_core::identity::AuthIdentity;
use rig_core::responses::TokenResponse;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ApiError, ApiJson};
use crate::context::SharedContext;

pub fn routes() -> Router<SharedContext> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

fn identity_from(parts: &Parts, ctx: &SharedContext) -> Result<Option<AuthIdentity>, AuthError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let header = value.to_str().map_err(|_| AuthError::InvalidHeader)?;
    let token = parse_bearer(Some(header))?;
    let claims = ctx.tokens.validate(token)?;
    Ok(Some(claims.to_identity()))
}

/// Caller identity; rejects the request with 401 when absent or invalid.
pub struct RequireIdentity(pub AuthIdentity);

#[axum::async_trait]
impl FromRequestParts<SharedContext> for RequireIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &SharedContext,
    ) -> Result<Self, Self::Rejection> {
        match identity_from(parts, ctx)? {
            Some(identity) => Ok(Self(identity)),
            None => Err(AuthError::MissingHeader.into()),
        }
    }
}

/// Caller identity when a valid token is presented.
///
/// An invalid token is logged and treated as anonymous.
pub struct MaybeIdentity(pub Option<AuthIdentity>);

#[axum::async_trait]
impl FromRequestParts<SharedContext> for MaybeIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &SharedContext,
    ) -> Result<Self, Self::Rejection> {
        match identity_from(parts, ctx) {
            Ok(identity) => Ok(Self(identity)),
            Err(error) => {
                tracing::warn!(%error, "ignoring invalid bearer token; using repository scope");
                Ok(Self(None))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegisterBody {
    username: String,
    email: String,
    password: String,
}

async fn register(
    State(ctx): State<SharedContext>,
    ApiJson(body): ApiJson<RegisterBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if body.password.is_empty() {
        return Err(ApiError::Validation("password: must not be empty".to_string()));
    }
    let cost = ctx.config.auth.bcrypt_cost;
    let password = body.password;
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;
    let user = ctx
        .service
        .create_user(&body.username, &body.email, &hashed, UserRole::User)
        .await?;
    tracing::info!(username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "msg": "User created", "id": user.id })),
    ))
}

/// Password-grant credentials; extra OAuth2 form fields are ignored.
#[derive(Debug, Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

/// Login credentials from a JSON body or an urlencoded form.
struct Credentials(LoginBody);

#[axum::async_trait]
impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));
        let body = if is_json {
            ApiJson::<LoginBody>::from_request(req, state).await?.0
        } else {
            Form::<LoginBody>::from_request(req, state).await?.0
        };
        Ok(Self(body))
    }
}

async fn login(
    State(ctx): State<SharedContext>,
    Credentials(body): Credentials,
) -> Result<Json<TokenResponse>, ApiError> {
    let username = body.username.trim();
    let record = ctx.service.find_user_by_username(username).await?;
    let Some(record) = record.filter(|r| r.user.is_active) else {
        return Err(AuthError::InvalidCredentials.into());
    };
    let hash = record.hashed_password;
    let password = body.password;
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;
    if !valid {
        tracing::debug!(username, "login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }
    let token = ctx.tokens.issue(&record.user.username)?;
    Ok(Json(TokenResponse::bearer(token)))
}

async fn me(
    State(ctx): State<SharedContext>,
    RequireIdentity(identity): RequireIdentity,
) -> Result<Json<User>, ApiError> {
    match ctx.service.find_user_by_username(&identity.subject).await? {
        Some(record) => Ok(Json(record.user)),
        None => Err(ApiError::Unauthorized(format!(
            "account '{}' no longer exists",
            identity.subject
        ))),
    }
}
