//! Update Idol Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    idols::{
        errors::into_api_error,
        handlers::{INVALID_ID, IdolRequest, IdolResponse},
    },
    state::State,
};

/// Update Idol Handler
///
/// Replaces the idol's fields and bumps its version.
#[endpoint(
    tags("idols"),
    summary = "Update Idol",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Idol updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid idol payload"),
        (status_code = StatusCode::NOT_FOUND, description = "Idol not found"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<IdolResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let claims = depot.claims_or_401()?;
    let id = req.param_or_400::<i64>("id", INVALID_ID)?;

    let request: IdolRequest = json_body_or_400(req).await?;
    let update = request.into_update(&claims.username)?;

    let idol = state
        .app
        .idols
        .update_idol(id, update)
        .await
        .map_err(into_api_error)?;

    Ok(Json(idol.into()))
}
