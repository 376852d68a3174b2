use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Request-level failures. Every variant is recovered at the handler boundary
/// and turned into a notice plus the screen the client should go back to.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{notice}")]
    Validation {
        notice: String,
        redirect_to: &'static str,
    },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Auth(String),

    #[error("Please log in to continue")]
    Unauthenticated,

    #[error("{0}")]
    NotFound(String),

    #[error("You cannot follow yourself")]
    SelfFollow,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(notice: impl Into<String>, redirect_to: &'static str) -> Self {
        Self::Validation {
            notice: notice.into(),
            redirect_to,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Conflict(_) => "conflict",
            Self::Auth(_) => "auth",
            Self::Unauthenticated => "unauthenticated",
            Self::NotFound(_) => "not_found",
            Self::SelfFollow => "self_follow",
            Self::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Auth(_) | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SelfFollow => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn redirect_to(&self) -> &'static str {
        match self {
            Self::Validation { redirect_to, .. } => *redirect_to,
            Self::Conflict(_) => "/register",
            Self::Auth(_) | Self::Unauthenticated => "/login",
            Self::NotFound(_) | Self::SelfFollow | Self::Internal(_) => "/dashboard",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation(detail) => {
                Self::Conflict(format!("Record already exists: {detail}"))
            }
            StoreError::MissingReference(detail) => Self::NotFound(detail),
            other => Self::Internal(anyhow::Error::new(other)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    notice: String,
    redirect_to: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let notice = match &self {
            Self::Internal(e) => {
                error!(error = ?e, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: self.kind(),
            notice,
            redirect_to: self.redirect_to(),
        };
        (self.status(), Json(body)).into_response()
    }
}
