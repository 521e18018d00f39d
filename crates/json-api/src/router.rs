//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{
    auth::{
        self,
        handlers::{login, logout, post_only},
    },
    cors, healthcheck, home, idols,
    observability::request_logging,
    state::State,
    users,
};

const OPENAPI_PATH: &str = "/swagger.json";

/// Every API route, without documentation.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .get(home::handler)
        .push(Router::with_path("healthz").get(healthcheck::handler))
        .push(post_only("api/login", login::handler))
        .push(post_only("api/logout", logout::handler))
        .push(Router::with_path("api/users").get(users::handler))
        .push(
            Router::with_path("api/idols")
                .get(idols::index::handler)
                .post(idols::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(idols::get::handler)
                        .put(idols::update::handler)
                        .delete(idols::delete::handler),
                ),
        )
}

/// Adds the `OpenAPI` document and Swagger UI to `router`.
pub(crate) fn with_docs(router: Router) -> Router {
    let doc = OpenApi::new("Idols API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router(OPENAPI_PATH))
        .push(SwaggerUi::new(OPENAPI_PATH).into_router("swagger"))
}

/// Wraps `router` in the service-level middleware.
///
/// The gate runs as a service hoop so requests that match no route are still
/// rejected without a valid token.
pub(crate) fn service(state: Arc<State>, router: Router) -> Service {
    Service::new(router)
        .hoop(request_logging)
        .hoop(cors::handler)
        .hoop(inject(state))
        .hoop(auth::middleware::handler)
}
