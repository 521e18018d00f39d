//! Auth service errors.

use thiserror::Error;

use crate::auth::TokenIssueError;

/// Why a presented token does not authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenInvalid {
    #[error("token is malformed")]
    Malformed,

    #[error("token was never issued")]
    Unknown,

    #[error("token has expired")]
    Expired,

    #[error("token has been revoked")]
    Revoked,
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("invalid username or password")]
    Unauthorized,
}

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken(#[source] TokenInvalid),

    #[error("failed to create token")]
    Issue(#[source] TokenIssueError),
}

impl From<CredentialsError> for AuthServiceError {
    fn from(error: CredentialsError) -> Self {
        match error {
            CredentialsError::Unauthorized => Self::InvalidCredentials,
        }
    }
}

impl From<TokenInvalid> for AuthServiceError {
    fn from(error: TokenInvalid) -> Self {
        Self::InvalidToken(error)
    }
}

impl From<TokenIssueError> for AuthServiceError {
    fn from(error: TokenIssueError) -> Self {
        Self::Issue(error)
    }
}
