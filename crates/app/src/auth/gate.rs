//! Access Gate
//!
//! Classifies request paths as public or protected and, for protected paths,
//! requires a bearer token the auth service accepts.

use thiserror::Error;
use tracing::debug;

use crate::auth::{AuthService, Claims};

/// Header value prefix introducing a bearer token.
pub const BEARER_PREFIX: &str = "Bearer ";

const PUBLIC_PREFIXES: [&str; 2] = ["/api/login", "/swagger"];
const PUBLIC_SUFFIXES: [&str; 3] = [".html", ".js", ".css"];

/// Outcome of a gate decision that lets the request through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated(Claims),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("missing bearer token")]
    MissingBearerToken,

    #[error("invalid or expired token")]
    InvalidToken,
}

/// Whether `path` bypasses authentication.
///
/// Matching is by exact prefix, suffix or equality only.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    path == "/"
        || PUBLIC_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
        || PUBLIC_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Extract the token from an `Authorization` header value.
#[must_use]
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    authorization?
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}

/// Decide whether a request for `path` may proceed.
///
/// # Errors
///
/// Returns [`AccessDenied`] when a protected path lacks a usable bearer
/// token or the token does not authenticate.
pub fn decide(
    auth: &dyn AuthService,
    path: &str,
    authorization: Option<&str>,
) -> Result<Access, AccessDenied> {
    if is_public_path(path) {
        return Ok(Access::Public);
    }

    let token = bearer_token(authorization).ok_or_else(|| {
        debug!(path, "rejected request without bearer token");

        AccessDenied::MissingBearerToken
    })?;

    auth.authenticate(token)
        .map(Access::Authenticated)
        .map_err(|error| {
            debug!(path, reason = %error, "rejected request with invalid token");

            AccessDenied::InvalidToken
        })
}
