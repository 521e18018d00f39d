//! Get Idol Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    idols::{
        errors::into_api_error,
        handlers::{INVALID_ID, IdolResponse},
    },
    state::State,
};

/// Get Idol Handler
#[endpoint(
    tags("idols"),
    summary = "Get Idol",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Idol found"),
        (status_code = StatusCode::NOT_FOUND, description = "Idol not found"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<IdolResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = req.param_or_400::<i64>("id", INVALID_ID)?;

    let idol = state
        .app
        .idols
        .get_idol(id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(idol.into()))
}
