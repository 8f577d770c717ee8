//! Login and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};

use crate::error::ApiError;
use crate::http::dto::{LoginResponse, ResponseStatus};
use crate::http::middleware::AuthContext;
use crate::http::request::BasicCredentials;
use crate::http::response::{json_response, ok_response};
use crate::http::server::AppState;
use crate::model::User;

pub const BASIC_CHALLENGE: &str = "Basic realm=Restricted";

fn unauthorized() -> Response {
    (
        [(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(BASIC_CHALLENGE),
        )],
        ApiError::Unauthorized,
    )
        .into_response()
}

/// POST /login with basic credentials.
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(credentials) = BasicCredentials::from_headers(&headers) else {
        return unauthorized();
    };

    match state
        .backend
        .login(&credentials.email, &credentials.password)
        .await
    {
        Ok(User {
            token: Some(token), ..
        }) => json_response(
            StatusCode::OK,
            &LoginResponse {
                status: ResponseStatus::Ok,
                token,
            },
        ),
        Ok(_) => {
            tracing::error!(module = "authhandler", method = "login", "Backend returned no token");
            ApiError::Internal.into_response()
        }
        Err(e) => match ApiError::from(e) {
            ApiError::Unauthorized => unauthorized(),
            other => other.into_response(),
        },
    }
}

/// GET /logout, invalidating the bearer token of the request.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, ApiError> {
    state
        .backend
        .logout(&User::with_token(auth.token))
        .await
        .map_err(|_| ApiError::Internal)?;

    tracing::debug!(module = "authhandler", method = "logout", user_id = auth.user_id, "Logged out");
    Ok(ok_response())
}
