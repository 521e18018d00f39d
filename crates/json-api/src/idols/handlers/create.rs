//! Create Idol Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    idols::{
        errors::into_api_error,
        handlers::{IdolRequest, IdolResponse},
    },
    state::State,
};

/// Create Idol Handler
///
/// The authenticated username is recorded as the idol's creator.
#[endpoint(
    tags("idols"),
    summary = "Create Idol",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Idol created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid idol payload"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<IdolResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let claims = depot.claims_or_401()?;

    let request: IdolRequest = json_body_or_400(req).await?;
    let new_idol = request.into_new_idol(&claims.username)?;

    let idol = state
        .app
        .idols
        .create_idol(new_idol)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/api/idols/{}", idol.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(idol.into()))
}
