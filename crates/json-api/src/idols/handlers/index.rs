//! Idol Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    idols::{errors::into_api_error, handlers::IdolResponse},
    state::State,
};

/// Idol Index Handler
///
/// Returns every idol that hasn't been deleted, ordered by id.
#[endpoint(
    tags("idols"),
    summary = "List Idols",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<IdolResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let idols = state
        .app
        .idols
        .list_idols()
        .await
        .map_err(into_api_error)?;

    Ok(Json(idols.into_iter().map(IdolResponse::from).collect()))
}
