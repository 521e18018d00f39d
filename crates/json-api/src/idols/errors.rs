//! Idol Errors

use tracing::error;

use idols_app::domain::idols::IdolsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: IdolsServiceError) -> ApiError {
    match error {
        IdolsServiceError::NotFound => ApiError::not_found("idol not found"),
        IdolsServiceError::MissingRequiredData | IdolsServiceError::InvalidData => {
            ApiError::bad_request("invalid idol payload")
        }
        IdolsServiceError::Sql(source) => {
            error!("idol storage failure: {source}");

            ApiError::internal("internal server error")
        }
    }
}
