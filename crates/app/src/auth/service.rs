//! Auth service.

use std::sync::Arc;

use mockall::automock;
use tracing::{info, warn};

use crate::auth::{
    AuthServiceError, Claims, CredentialSource, IssuedToken, TokenIssuer, TokenStore,
};

/// Session auth backed by configured credentials and the in-process token store.
#[derive(Debug, Clone)]
pub struct SessionAuthService {
    credentials: CredentialSource,
    issuer: TokenIssuer,
    store: Arc<TokenStore>,
}

impl SessionAuthService {
    #[must_use]
    pub fn new(credentials: CredentialSource, issuer: TokenIssuer, store: Arc<TokenStore>) -> Self {
        Self {
            credentials,
            issuer,
            store,
        }
    }
}

impl AuthService for SessionAuthService {
    fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthServiceError> {
        let identity = self
            .credentials
            .verify(username, password)
            .inspect_err(|_| warn!(username, "login rejected"))?;

        let issued = self.issuer.issue(&identity)?;

        self.store.insert(issued.token.clone(), issued.claims.clone());

        info!(
            username = %identity.username,
            role = %identity.role,
            expires_at = %issued.claims.expires_at,
            "login succeeded"
        );

        Ok(issued)
    }

    fn logout(&self, token: &str) -> bool {
        let was_active = self.store.validate(token).is_ok();

        if let Some(expires_at) = self.store.expires_at(token) {
            self.store.revoke(token, expires_at);
        }

        info!(was_active, "logout");

        was_active
    }

    fn authenticate(&self, token: &str) -> Result<Claims, AuthServiceError> {
        self.store.validate(token).map_err(AuthServiceError::from)
    }

    fn usernames(&self) -> Vec<String> {
        self.credentials.usernames()
    }
}

#[automock]
pub trait AuthService: Send + Sync {
    /// Verify credentials and issue a new bearer token.
    fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthServiceError>;

    /// Revoke a bearer token. Returns `true` if the token was active.
    ///
    /// Unknown, expired or already revoked tokens are accepted as a no-op.
    fn logout(&self, token: &str) -> bool;

    /// Resolve a bearer token to the claims it was issued with.
    fn authenticate(&self, token: &str) -> Result<Claims, AuthServiceError>;

    /// Usernames of the configured credentials, in configuration order.
    fn usernames(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::auth::{CredentialRecord, DEFAULT_TOKEN_TTL, Role, TokenInvalid};

    use super::*;

    fn service() -> Result<SessionAuthService, AuthServiceError> {
        let credentials = CredentialSource::new(
            vec![
                CredentialRecord::new("alice", "pw1"),
                CredentialRecord::new("admin", "root"),
            ],
            CredentialRecord::new("admin", "admin"),
        );

        Ok(SessionAuthService::new(
            credentials,
            TokenIssuer::new(DEFAULT_TOKEN_TTL)?,
            Arc::new(TokenStore::new()),
        ))
    }

    #[test]
    fn login_token_authenticates_as_issued_identity() -> TestResult {
        let auth = service()?;

        let issued = auth.login("alice", "pw1")?;
        let claims = auth.authenticate(&issued.token)?;

        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims, issued.claims);
        assert_eq!(issued.expires_in, 3600);

        Ok(())
    }

    #[test]
    fn admin_login_yields_admin_role() -> TestResult {
        let auth = service()?;

        let issued = auth.login("admin", "root")?;

        assert_eq!(auth.authenticate(&issued.token)?.role, Role::Admin);

        Ok(())
    }

    #[test]
    fn login_with_wrong_password_is_rejected() -> TestResult {
        let auth = service()?;

        let result = auth.login("alice", "wrong");

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn logout_revokes_token() -> TestResult {
        let auth = service()?;
        let issued = auth.login("alice", "pw1")?;

        assert!(auth.logout(&issued.token), "token should have been active");

        let result = auth.authenticate(&issued.token);

        assert!(
            matches!(
                result,
                Err(AuthServiceError::InvalidToken(TokenInvalid::Revoked))
            ),
            "expected Revoked, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn repeated_logout_is_a_no_op() -> TestResult {
        let auth = service()?;
        let issued = auth.login("alice", "pw1")?;

        assert!(auth.logout(&issued.token), "first logout should revoke");
        assert!(!auth.logout(&issued.token), "second logout should be a no-op");
        assert!(auth.authenticate(&issued.token).is_err());

        Ok(())
    }

    #[test]
    fn logout_of_unknown_token_is_a_no_op() -> TestResult {
        let auth = service()?;

        assert!(!auth.logout("not-a-token"));
        assert!(!auth.logout(&"ab".repeat(32)));

        Ok(())
    }

    #[test]
    fn logout_leaves_other_sessions_alone() -> TestResult {
        let auth = service()?;
        let first = auth.login("alice", "pw1")?;
        let second = auth.login("alice", "pw1")?;

        auth.logout(&first.token);

        assert!(auth.authenticate(&second.token).is_ok());

        Ok(())
    }

    #[test]
    fn issuance_respects_configured_ttl() -> TestResult {
        let auth = SessionAuthService::new(
            CredentialSource::new(Vec::new(), CredentialRecord::new("admin", "admin")),
            TokenIssuer::new(SignedDuration::from_mins(5))?,
            Arc::new(TokenStore::new()),
        );

        let issued = auth.login("admin", "admin")?;

        assert_eq!(issued.expires_in, 300);
        assert_eq!(issued.claims.role, Role::Admin);
        assert_eq!(auth.usernames(), vec!["admin".to_string()]);

        Ok(())
    }
}
