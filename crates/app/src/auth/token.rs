//! Bearer token generation and issuance.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::{Claims, Identity, IssuedToken};

/// Number of random bytes encoded in a token.
pub const TOKEN_SECRET_BYTES: usize = 32;

/// Length of the hex encoding of a token.
pub const TOKEN_HEX_CHARS: usize = TOKEN_SECRET_BYTES * 2;

/// Default token time-to-live.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(1);

#[derive(Debug, Error)]
pub enum TokenIssueError {
    #[error("token ttl must be positive, got {0:?}")]
    InvalidTtl(SignedDuration),

    #[error("failed to read from the OS entropy source")]
    Entropy(#[source] rand::Error),

    #[error("token expiry is out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),
}

#[derive(Clone)]
pub struct TokenSecret {
    bytes: [u8; TOKEN_SECRET_BYTES],
}

impl TokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    /// Lowercase hex encoding, which is the bearer token presented by clients.
    #[must_use]
    pub fn to_token(&self) -> String {
        self.bytes.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Draw a fresh secret from the OS CSPRNG.
///
/// # Errors
///
/// Returns an error when the entropy source cannot be read.
pub fn generate_token_secret() -> Result<TokenSecret, TokenIssueError> {
    let mut secret = [0_u8; TOKEN_SECRET_BYTES];

    OsRng
        .try_fill_bytes(&mut secret)
        .map_err(TokenIssueError::Entropy)?;

    Ok(TokenSecret::from_bytes(secret))
}

/// Whether `token` has the shape of an issued token (64 lowercase hex chars).
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_HEX_CHARS
        && token
            .bytes()
            .all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'))
}

/// Mints opaque bearer tokens with a fixed time-to-live.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    ttl: SignedDuration,
}

impl TokenIssuer {
    /// Build an issuer, checking the TTL and that the entropy source answers.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive TTL, a TTL whose expiry can't be
    /// represented, or an unusable entropy source.
    pub fn new(ttl: SignedDuration) -> Result<Self, TokenIssueError> {
        if ttl <= SignedDuration::ZERO {
            return Err(TokenIssueError::InvalidTtl(ttl));
        }

        Timestamp::now()
            .checked_add(ttl)
            .map_err(TokenIssueError::ExpiryOutOfRange)?;

        generate_token_secret()?;

        Ok(Self { ttl })
    }

    /// Issue a token for `identity`, valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns an error when the entropy source fails.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenIssueError> {
        self.issue_at(identity, Timestamp::now())
    }

    /// Issue a token for `identity` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the entropy source fails or the expiry overflows.
    pub fn issue_at(
        &self,
        identity: &Identity,
        now: Timestamp,
    ) -> Result<IssuedToken, TokenIssueError> {
        let expires_at = now
            .checked_add(self.ttl)
            .map_err(TokenIssueError::ExpiryOutOfRange)?;

        let secret = generate_token_secret()?;

        Ok(IssuedToken {
            token: secret.to_token(),
            claims: Claims {
                username: identity.username.clone(),
                role: identity.role,
                issued_at: now,
                expires_at,
            },
            expires_in: self.ttl.as_secs(),
        })
    }
}
