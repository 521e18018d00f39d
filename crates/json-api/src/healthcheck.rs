//! Health Check Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Health check handler
///
/// Reports `ok` once the server is accepting requests.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
