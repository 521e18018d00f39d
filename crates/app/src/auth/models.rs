//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Role granted to an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified username together with the role derived at verification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// Identity, role and lifetime bound to a token when it is issued.
///
/// Claims never change after issuance; only the revocation status of the
/// token they belong to does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: Role,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Claims {
    /// Whether the claims are past their natural expiry at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// Token issuance result with the raw bearer token.
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,

    /// Seconds between issuance and expiry.
    pub expires_in: i64,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"**redacted**")
            .field("claims", &self.claims)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
