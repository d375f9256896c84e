//! HTTP error responses.
//!
//! Every failure is rendered as `{"message": ...}`. Internal errors are logged
//! and reported as a bare "Server Error".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domains::jobs::JobError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Not Authorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Server Error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::JobNotFound | JobError::UserNotFound => ApiError::NotFound(err.to_string()),
            JobError::AlreadyApplied | JobError::Validation(_) => {
                ApiError::BadRequest(err.to_string())
            }
            JobError::NotOwner(_) => ApiError::Forbidden(err.to_string()),
            JobError::Internal(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            tracing::error!(error = %e, "Request failed");
        }

        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}
