//! Home Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Where the interactive API documentation is served.
pub(crate) const DOCS_PATH: &str = "/swagger";

/// Service description
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HomeResponse {
    pub name: String,
    pub version: String,

    /// Path of the Swagger UI
    pub docs: String,
}

#[endpoint(tags("health"), summary = "Describe the service")]
pub(crate) async fn handler() -> Json<HomeResponse> {
    Json(HomeResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: DOCS_PATH.to_string(),
    })
}
