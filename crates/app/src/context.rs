//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{
        AuthService, CredentialSource, SessionAuthService, TokenIssueError, TokenIssuer,
        TokenStore,
    },
    database::{self, Db},
    domain::idols::{IdolsService, PgIdolsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("failed to configure token issuer")]
    Issuer(#[source] TokenIssueError),
}

/// Settings for the session auth service.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token_ttl: SignedDuration,
    pub credentials: CredentialSource,
}

#[derive(Clone)]
pub struct AppContext {
    pub idols: Arc<dyn IdolsService>,
    pub auth: Arc<dyn AuthService>,

    /// The process token store, shared with the auth service.
    pub tokens: Arc<TokenStore>,
}

impl AppContext {
    /// Build the auth half of the context around a fresh token store.
    ///
    /// # Errors
    ///
    /// Returns an error when the token issuer rejects its configuration.
    pub fn session_auth(
        settings: AuthSettings,
    ) -> Result<(Arc<dyn AuthService>, Arc<TokenStore>), AppInitError> {
        let tokens = Arc::new(TokenStore::new());
        let issuer = TokenIssuer::new(settings.token_ttl).map_err(AppInitError::Issuer)?;

        let auth = SessionAuthService::new(settings.credentials, issuer, Arc::clone(&tokens));

        Ok((Arc::new(auth), tokens))
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or configuring auth fails.
    pub async fn from_database_url(url: &str, auth: AuthSettings) -> Result<Self, AppInitError> {
        let (auth, tokens) = Self::session_auth(auth)?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        info!("database migrations applied");

        Ok(Self {
            idols: Arc::new(PgIdolsService::new(Db::new(pool))),
            auth,
            tokens,
        })
    }
}
