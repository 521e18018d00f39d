//! Delete Idol Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    idols::{errors::into_api_error, handlers::INVALID_ID},
    state::State,
};

/// Idol Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdolDeletedResponse {
    pub status: String,
}

/// Delete Idol Handler
///
/// Soft deletes the idol; it disappears from listings and lookups.
#[endpoint(
    tags("idols"),
    summary = "Delete Idol",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Idol deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Idol not found"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<IdolDeletedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let claims = depot.claims_or_401()?;
    let id = req.param_or_400::<i64>("id", INVALID_ID)?;

    state
        .app
        .idols
        .delete_idol(id, &claims.username)
        .await
        .map_err(into_api_error)?;

    Ok(Json(IdolDeletedResponse {
        status: "deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use idols_app::domain::idols::{IdolsServiceError, MockIdolsService};

    use crate::test_helpers::{TEST_USERNAME, idols_service};

    use super::*;

    fn make_service(idols: MockIdolsService) -> Service {
        idols_service(idols, Router::with_path("api/idols/{id}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_idol_success() -> TestResult {
        let mut idols = MockIdolsService::new();

        idols
            .expect_delete_idol()
            .once()
            .withf(|id, deleted_by| *id == 1 && deleted_by == TEST_USERNAME)
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::delete("http://example.com/api/idols/1")
            .send(&make_service(idols))
            .await;

        let body: IdolDeletedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "deleted");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_idol_returns_404() -> TestResult {
        let mut idols = MockIdolsService::new();

        idols
            .expect_delete_idol()
            .once()
            .withf(|id, _| *id == 7)
            .return_once(|_, _| Err(IdolsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/api/idols/7")
            .send(&make_service(idols))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
