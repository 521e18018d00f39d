//! Access gate middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use idols_app::auth::gate::{self, Access};

use crate::{errors::ApiError, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match gate::decide(state.app.auth.as_ref(), req.uri().path(), authorization) {
        Ok(Access::Public) => {}
        Ok(Access::Authenticated(claims)) => depot.insert_claims(claims),
        Err(denied) => {
            res.render(ApiError::from(denied));
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use idols_app::auth::{AuthServiceError, MockAuthService, TokenInvalid};
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{
        errors::ErrorResponse,
        test_helpers::{make_state, strict_idols_mock, test_claims},
    };

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot
            .claims_or_401()
            .map_or_else(|_| "anonymous".to_string(), |claims| claims.username.clone());

        res.render(user);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let router = Router::new()
            .hoop(inject(make_state(strict_idols_mock(), auth)))
            .hoop(handler)
            .push(Router::with_path("api/idols").get(echo_user))
            .push(Router::with_path("docs/index.html").get(echo_user));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let mut res = TestClient::get("http://example.com/api/idols")
            .send(&make_service(auth))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error, "missing bearer token");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let mut res = TestClient::get("http://example.com/api/idols")
            .add_header(AUTHORIZATION, "Basic xyz", true)
            .send(&make_service(auth))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error, "missing bearer token");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::InvalidToken(TokenInvalid::Expired)));

        let mut res = TestClient::get("http://example.com/api/idols")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error, "invalid or expired token");

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_claims() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Ok(test_claims()));

        let mut res = TestClient::get("http://example.com/api/idols")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "alice");

        Ok(())
    }

    #[tokio::test]
    async fn test_static_asset_path_bypasses_gate() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let mut res = TestClient::get("http://example.com/docs/index.html")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }
}
