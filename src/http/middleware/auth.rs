//! Bearer authentication middleware.
//!
//! Gates protected routes:
//! 1. No usable `Authorization` header → 401
//! 2. Not `Bearer <token>` → 400
//! 3. Token rejected by `CheckSecret`, or user lacks id/token → 401
//! 4. Otherwise attach [`AuthContext`] to the request and continue
//!
//! Every rejection carries `WWW-Authenticate: Bearer realm=Restricted`.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::http::request::{bearer_token, BearerError};
use crate::http::server::AppState;

pub const BEARER_CHALLENGE: &str = "Bearer realm=Restricted";

/// Identity resolved for an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: u64,
    pub token: String,
}

fn reject(err: ApiError) -> Response {
    (
        [(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(BEARER_CHALLENGE),
        )],
        err,
    )
        .into_response()
}

pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Ok(token) => token.to_string(),
        Err(BearerError::Missing) => return reject(ApiError::Unauthorized),
        Err(BearerError::Malformed) => {
            tracing::debug!(module = "auth", "Malformed authorization header");
            return reject(ApiError::BadRequest("authorization header"));
        }
    };

    let user = match state.backend.check_secret(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(module = "auth", error = %e, "Bearer token rejected");
            return reject(ApiError::Unauthorized);
        }
    };

    match (user.id, user.token) {
        (Some(user_id), Some(token)) => {
            request
                .extensions_mut()
                .insert(AuthContext { user_id, token });
            next.run(request).await
        }
        _ => reject(ApiError::Unauthorized),
    }
}
