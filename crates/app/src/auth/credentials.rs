//! Credential verification against the configured user list.

use std::{fmt, io, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::auth::{CredentialsError, Identity, Role};

/// Username that is granted the admin role when verified from a user list.
pub const ADMIN_USERNAME: &str = "admin";

/// A configured username/password pair.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
}

impl CredentialRecord {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Where login credentials are checked.
///
/// A non-empty user list always wins; the basic pair is consulted only when
/// no users are configured.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    Users(Vec<CredentialRecord>),
    Basic(CredentialRecord),
}

impl CredentialSource {
    #[must_use]
    pub fn new(users: Vec<CredentialRecord>, basic: CredentialRecord) -> Self {
        if users.is_empty() {
            Self::Basic(basic)
        } else {
            Self::Users(users)
        }
    }

    /// Verify a username/password pair and derive the identity's role.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::Unauthorized`] when no configured pair
    /// matches exactly.
    pub fn verify(&self, username: &str, password: &str) -> Result<Identity, CredentialsError> {
        match self {
            Self::Users(users) => users
                .iter()
                .find(|record| record.matches(username, password))
                .map(|record| Identity {
                    username: record.username.clone(),
                    role: role_for(&record.username),
                })
                .ok_or(CredentialsError::Unauthorized),
            Self::Basic(record) if record.matches(username, password) => Ok(Identity {
                username: record.username.clone(),
                role: Role::Admin,
            }),
            Self::Basic(_) => Err(CredentialsError::Unauthorized),
        }
    }

    /// Configured usernames in list order.
    #[must_use]
    pub fn usernames(&self) -> Vec<String> {
        match self {
            Self::Users(users) => users.iter().map(|record| record.username.clone()).collect(),
            Self::Basic(record) => vec![record.username.clone()],
        }
    }
}

fn role_for(username: &str) -> Role {
    if username == ADMIN_USERNAME {
        Role::Admin
    } else {
        Role::User
    }
}

#[derive(Debug, Error)]
pub enum UsersFileError {
    #[error("failed to read users file")]
    Read(#[source] io::Error),

    #[error("failed to parse users file")]
    Parse(#[source] serde_norway::Error),
}

#[derive(Debug, Default, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<CredentialRecord>,
}

/// Load the `users:` list from a YAML file.
///
/// A missing file yields an empty list so the basic pair takes over.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load_users_file(path: &Path) -> Result<Vec<CredentialRecord>, UsersFileError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "users file not found");

            return Ok(Vec::new());
        }
        Err(error) => return Err(UsersFileError::Read(error)),
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let file: UsersFile = serde_norway::from_str(&contents).map_err(UsersFileError::Parse)?;

    Ok(file.users)
}
