//! Login Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use idols_app::auth::AuthServiceError;

use crate::{errors::ApiError, extensions::*, state::State};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    /// Seconds until the token expires
    pub expires_in: i64,

    /// Role granted to the token
    pub role: String,
}

/// Login Handler
///
/// Exchanges a username and password for a bearer token. The body must be
/// `{"username": ..., "password": ...}`.
#[endpoint(
    tags("auth"),
    summary = "Log in",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid JSON body"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid username or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Token could not be created"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let credentials: LoginRequest = json_body_or_400(req).await?;

    let issued = state
        .app
        .auth
        .login(&credentials.username, &credentials.password)
        .map_err(into_api_error)?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_in: issued.expires_in,
        role: issued.claims.role.to_string(),
    }))
}

fn into_api_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::InvalidCredentials | AuthServiceError::InvalidToken(_) => {
            ApiError::unauthorized("invalid username or password")
        }
        AuthServiceError::Issue(source) => {
            error!("failed to create token: {source}");

            ApiError::internal("failed to create token")
        }
    }
}
