//! Request helper extensions.

use salvo::prelude::Request;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;

/// Helpers for mapping request extraction failures to HTTP errors.
pub(crate) trait RequestExt {
    fn param_or_400<T: DeserializeOwned>(&self, key: &str, message: &str)
    -> Result<T, ApiError>;
}

impl RequestExt for Request {
    fn param_or_400<T: DeserializeOwned>(
        &self,
        key: &str,
        message: &str,
    ) -> Result<T, ApiError> {
        self.param::<T>(key)
            .ok_or_else(|| ApiError::bad_request(message))
    }
}

/// Parse the JSON body, answering 400 `invalid JSON body` when it doesn't fit `T`.
pub(crate) async fn json_body_or_400<T: DeserializeOwned>(
    req: &mut Request,
) -> Result<T, ApiError> {
    req.parse_json::<T>().await.map_err(|error| {
        debug!("rejected request body: {error}");

        ApiError::bad_request("invalid JSON body")
    })
}
