//! Users Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, state::State};

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub username: String,
}

/// Users Handler
///
/// Lists the configured usernames. Passwords are never returned.
#[endpoint(tags("users"), summary = "List Users", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .auth
        .usernames()
        .into_iter()
        .map(|username| UserResponse { username })
        .collect();

    Ok(Json(users))
}
