//! Session Handlers

pub(crate) mod login;
pub(crate) mod logout;

use salvo::prelude::*;

use crate::errors::ApiError;

/// Answers cross-origin preflight requests on session endpoints.
#[handler]
pub(crate) async fn preflight(res: &mut Response) {
    res.status_code(StatusCode::NO_CONTENT);
}

/// Fallback for unsupported methods on session endpoints.
#[handler]
pub(crate) async fn method_not_allowed(res: &mut Response) {
    res.render(ApiError::method_not_allowed());
}

/// Mounts a session endpoint that only accepts `POST`.
pub(crate) fn post_only<H: Handler>(path: &str, post: H) -> Router {
    Router::with_path(path)
        .post(post)
        .options(preflight)
        .goal(method_not_allowed)
}
