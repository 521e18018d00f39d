//! Idol Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use idols_app::domain::idols::{
    data::{IdolUpdate, NewIdol},
    records::IdolRecord,
};

use crate::errors::ApiError;

const INVALID_ID: &str = "invalid idol id";

/// Idol Request
///
/// Body of create and update requests. Every field must be non-blank.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdolRequest {
    pub name: String,
    pub group: String,
    pub position: String,
}

impl IdolRequest {
    fn validate(self) -> Result<Self, ApiError> {
        let blank = [&self.name, &self.group, &self.position]
            .into_iter()
            .any(|field| field.trim().is_empty());

        if blank {
            return Err(ApiError::bad_request("invalid idol payload"));
        }

        Ok(self)
    }

    pub(crate) fn into_new_idol(self, created_by: &str) -> Result<NewIdol, ApiError> {
        let request = self.validate()?;

        Ok(NewIdol {
            name: request.name,
            group: request.group,
            position: request.position,
            created_by: created_by.to_string(),
        })
    }

    pub(crate) fn into_update(self, updated_by: &str) -> Result<IdolUpdate, ApiError> {
        let request = self.validate()?;

        Ok(IdolUpdate {
            name: request.name,
            group: request.group,
            position: request.position,
            updated_by: updated_by.to_string(),
        })
    }
}

/// Idol Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdolResponse {
    pub id: i64,
    pub name: String,
    pub group: String,
    pub position: String,

    /// The date and time the idol was created
    pub created_at: String,

    /// The date and time the idol was last updated
    pub updated_at: String,

    pub created_by: String,
    pub updated_by: String,

    /// The date and time the idol was deleted
    pub deleted_at: Option<String>,

    /// Incremented on every update
    pub version: i32,
}

impl From<IdolRecord> for IdolResponse {
    fn from(idol: IdolRecord) -> Self {
        IdolResponse {
            id: idol.id,
            name: idol.name,
            group: idol.group,
            position: idol.position,
            created_at: idol.created_at.to_string(),
            updated_at: idol.updated_at.to_string(),
            created_by: idol.created_by,
            updated_by: idol.updated_by,
            deleted_at: idol.deleted_at.as_ref().map(ToString::to_string),
            version: idol.version,
        }
    }
}
