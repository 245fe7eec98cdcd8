use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use rig_auth::AuthError;
use rig_catalog::CatalogError;
use rig_db::error::DatabaseError;
use rig_files::FilesError;
use rig_git::GitError;
use serde::Serialize;
use thiserror::Error;

/// Every failure an HTTP handler can surface, one variant per status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AccessDenied(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    /// The git CLI failed during clone or checkout.
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    detail: String,
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AccessDenied(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::AccessDenied(_) => "access_denied",
            Self::Validation(_) => "validation",
            Self::Unauthorized(_) => "unauthorized",
            Self::Upstream(_) => "upstream",
            Self::Decode(_) => "decode",
            Self::Internal(_) => "internal",
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        tracing::error!(%error, "request failed");
        Self::Internal("internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            code: self.code(),
            detail: self.to_string(),
        });
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { entity, id } => Self::NotFound(format!("{entity} {id} not found")),
            DatabaseError::Validation(msg) => Self::Validation(msg),
            other => Self::internal(other),
        }
    }
}

impl From<GitError> for ApiError {
    fn from(error: GitError) -> Self {
        match error {
            GitError::InvalidArgument(msg) => Self::Validation(msg),
            GitError::NotGitRepo(path) => {
                Self::Validation(format!("not a git repository: {}", path.display()))
            }
            GitError::Git(stderr) => {
                tracing::warn!(%stderr, "git command failed");
                Self::Upstream(format!("git failed: {}", stderr.trim()))
            }
            GitError::Io(e) => Self::internal(e),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Validation(msg) => Self::Validation(msg),
            CatalogError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            CatalogError::Git(e) => e.into(),
            CatalogError::Database(e) => e.into(),
            other => Self::internal(other),
        }
    }
}

impl From<FilesError> for ApiError {
    fn from(error: FilesError) -> Self {
        match error {
            FilesError::NotFound(_) => Self::NotFound(error.to_string()),
            FilesError::AccessDenied(_) => Self::AccessDenied(error.to_string()),
            FilesError::Validation(msg) => Self::Validation(msg),
            FilesError::Decode(_) => Self::Decode(error.to_string()),
            other => Self::internal(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Hash(e) => Self::internal(e),
            other => Self::Unauthorized(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::internal(error)
    }
}
