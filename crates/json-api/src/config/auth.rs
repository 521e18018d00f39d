//! Auth Config

use std::{path::PathBuf, time::Duration};

use clap::Args;
use jiff::SignedDuration;

use idols_app::{
    auth::{CredentialRecord, CredentialSource, UsersFileError, load_users_file},
    context::AuthSettings,
};

/// Login credentials and token lifetime settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Lifetime of issued bearer tokens, in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = 3_600_i64)]
    pub token_ttl_seconds: i64,

    /// Interval between purges of expired tokens, in seconds (0 disables)
    #[arg(long, env = "TOKEN_SWEEP_INTERVAL_SECONDS", default_value_t = 60_u64)]
    pub token_sweep_interval_seconds: u64,

    /// YAML file holding the `users:` credential list
    #[arg(long, env = "USERS_FILE", default_value = "config.yaml")]
    pub users_file: PathBuf,

    /// Username accepted when no users are configured
    #[arg(long, env = "BASIC_USERNAME", default_value = "admin")]
    pub basic_username: String,

    /// Password accepted when no users are configured
    #[arg(long, env = "BASIC_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub basic_password: String,
}

impl AuthConfig {
    /// Token sweep interval, or `None` when sweeping is disabled.
    #[must_use]
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.token_sweep_interval_seconds > 0)
            .then(|| Duration::from_secs(self.token_sweep_interval_seconds))
    }

    /// Build session auth settings, reading the users file.
    ///
    /// # Errors
    ///
    /// Returns an error when the users file exists but can't be read or parsed.
    pub fn settings(&self) -> Result<AuthSettings, UsersFileError> {
        let users = load_users_file(&self.users_file)?;

        Ok(AuthSettings {
            token_ttl: SignedDuration::from_secs(self.token_ttl_seconds),
            credentials: CredentialSource::new(
                users,
                CredentialRecord::new(&self.basic_username, &self.basic_password),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use testresult::TestResult;

    use crate::config::ServerConfig;

    use super::*;

    fn parse(users_file: &std::path::Path) -> TestResult<ServerConfig> {
        let users_file = users_file.to_string_lossy().into_owned();

        Ok(ServerConfig::try_parse_from([
            "idols-json",
            "--database-url",
            "postgres://x",
            "--users-file",
            users_file.as_str(),
            "--basic-username",
            "ops",
        ])?)
    }

    #[test]
    fn missing_users_file_falls_back_to_basic_pair() -> TestResult {
        let dir = tempfile::tempdir()?;
        let config = parse(&dir.path().join("absent.yaml"))?;

        let settings = config.auth.settings()?;

        assert_eq!(settings.credentials.usernames(), vec!["ops".to_string()]);
        assert_eq!(settings.token_ttl, SignedDuration::from_hours(1));

        Ok(())
    }

    #[test]
    fn users_file_replaces_basic_pair() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;

        writeln!(file, "users:\n  - username: alice\n    password: pw1")?;

        let settings = parse(file.path())?.auth.settings()?;

        assert_eq!(settings.credentials.usernames(), vec!["alice".to_string()]);

        Ok(())
    }
}
