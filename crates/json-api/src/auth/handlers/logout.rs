//! Logout Handler

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use idols_app::auth::gate::{AccessDenied, bearer_token};

use crate::{errors::ApiError, extensions::*, state::State};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    pub message: String,
}

/// Logout Handler
///
/// Revokes the bearer token presented with the request. Logging out with a
/// token that is already revoked or expired still succeeds.
#[endpoint(
    tags("auth"),
    summary = "Log out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Token revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing bearer token"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<LogoutResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = bearer_token(authorization).ok_or(AccessDenied::MissingBearerToken)?;

    state.app.auth.logout(token);

    Ok(Json(LogoutResponse {
        message: "logout success".to_string(),
    }))
}
