//! Token Store
//!
//! Process-wide table of issued tokens and their revocations. Both maps live
//! behind one reader/writer lock so a validation always sees a single
//! consistent snapshot of issued claims and revocations.

use std::collections::HashMap;

use jiff::Timestamp;
use parking_lot::RwLock;
use tracing::trace;

use crate::auth::{Claims, TokenInvalid, is_well_formed};

#[derive(Debug, Default)]
struct Entries {
    issued: HashMap<String, Claims>,
    revoked: HashMap<String, Timestamp>,
}

impl Entries {
    fn purge(&mut self, now: Timestamp) -> usize {
        let before = self.issued.len() + self.revoked.len();

        self.issued.retain(|_, claims| !claims.is_expired_at(now));
        self.revoked.retain(|_, expires_at| *expires_at > now);

        before - (self.issued.len() + self.revoked.len())
    }
}

#[derive(Debug, Default)]
pub struct TokenStore {
    entries: RwLock<Entries>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly issued token.
    pub fn insert(&self, token: String, claims: Claims) {
        let now = Timestamp::now();
        let mut entries = self.entries.write();

        entries.purge(now);
        entries.issued.insert(token, claims);
    }

    /// Validate `token` against the current time.
    ///
    /// # Errors
    ///
    /// Returns the reason the token does not authenticate.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenInvalid> {
        self.validate_at(token, Timestamp::now())
    }

    /// Validate `token` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns the reason the token does not authenticate.
    pub fn validate_at(&self, token: &str, now: Timestamp) -> Result<Claims, TokenInvalid> {
        if !is_well_formed(token) {
            return Err(TokenInvalid::Malformed);
        }

        let entries = self.entries.read();

        if entries
            .revoked
            .get(token)
            .is_some_and(|expires_at| *expires_at > now)
        {
            return Err(TokenInvalid::Revoked);
        }

        let claims = entries.issued.get(token).ok_or(TokenInvalid::Unknown)?;

        if claims.is_expired_at(now) {
            return Err(TokenInvalid::Expired);
        }

        Ok(claims.clone())
    }

    /// Expiry recorded for an issued token, if the store still knows it.
    #[must_use]
    pub fn expires_at(&self, token: &str) -> Option<Timestamp> {
        self.entries
            .read()
            .issued
            .get(token)
            .map(|claims| claims.expires_at)
    }

    /// Add `token` to the revocation set until `expires_at`.
    ///
    /// Revoking twice is a no-op. The recorded instant is never earlier than
    /// the token's own expiry, so purging the revocation can't make the token
    /// valid again.
    pub fn revoke(&self, token: &str, expires_at: Timestamp) {
        let now = Timestamp::now();
        let mut entries = self.entries.write();

        entries.purge(now);

        let until = entries
            .issued
            .get(token)
            .map_or(expires_at, |claims| claims.expires_at.max(expires_at));

        if until <= now {
            trace!("skipping revocation of an already expired token");

            return;
        }

        entries
            .revoked
            .entry(token.to_string())
            .and_modify(|recorded| *recorded = (*recorded).max(until))
            .or_insert(until);
    }

    /// Drop every entry that is dead at the current time.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Timestamp::now())
    }

    /// Drop issued claims and revocations whose expiry is at or before `now`.
    pub fn purge_expired_at(&self, now: Timestamp) -> usize {
        self.entries.write().purge(now)
    }

    /// Number of issued tokens and live revocations currently held.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        let entries = self.entries.read();

        (entries.issued.len(), entries.revoked.len())
    }
}
