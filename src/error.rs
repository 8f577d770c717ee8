//! # API Error
//!
//! Maps gateway failures to HTTP status codes. The body is always the bare
//! error envelope; causes stay in the server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::backend::BackendError;
use crate::http::response::error_response;

/// Error returned by HTTP handlers and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed client input: path id, body, or header.
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    /// Missing or rejected credentials.
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Backend or transport failure.
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound => Self::NotFound,
            BackendError::PermissionDenied => Self::Unauthorized,
            BackendError::Internal(_) => Self::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_response(self.status_code())
    }
}
