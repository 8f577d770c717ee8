//! Response rendering.
//!
//! Every body is an envelope carrying `status` (`ok` | `error`). Success
//! bodies add their payload fields; error bodies carry nothing else.
//! JSON is pretty-printed.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ApiError;
use crate::http::dto::{GeneralResponse, ResponseStatus};

/// Serialize `body` as indented JSON with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec_pretty(body) {
        Ok(bytes) => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            )],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(module = "http", method = "json_response", error = %e, "Response serialization failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `{"status": "ok"}` with 200.
pub fn ok_response() -> Response {
    json_response(
        StatusCode::OK,
        &GeneralResponse {
            status: ResponseStatus::Ok,
        },
    )
}

/// `{"status": "error"}` with the given status.
pub fn error_response(status: StatusCode) -> Response {
    json_response(
        status,
        &GeneralResponse {
            status: ResponseStatus::Error,
        },
    )
}

/// Fallback for routes that do not exist.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND)
}

/// Fallback for known routes called with an unsupported method.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED)
}

/// Turn the request timeout's bare 408 into an internal error envelope.
pub async fn envelope_timeouts(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!(module = "http", "Request timed out");
    ApiError::Internal.into_response()
}
