//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use idols_app::auth::Claims;

use crate::errors::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_claims(&mut self, claims: Claims);

    fn claims_or_401(&self) -> Result<&Claims, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::internal("internal server error"))
    }

    fn insert_claims(&mut self, claims: Claims) {
        self.inject(claims);
    }

    fn claims_or_401(&self) -> Result<&Claims, ApiError> {
        self.obtain::<Claims>()
            .map_err(|_ignored| ApiError::unauthorized("missing bearer token"))
    }
}
