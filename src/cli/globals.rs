use anyhow::{Result, anyhow};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Database credentials shared by every action.
#[derive(Clone, Default)]
pub struct GlobalArgs {
    pub db_username: Option<String>,
    pub db_password: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(db_username: Option<String>, db_password: Option<SecretString>) -> Self {
        Self {
            db_username,
            db_password,
        }
    }

    /// Apply the configured credentials to `dsn`; unset credentials keep the DSN's own.
    ///
    /// # Errors
    /// Returns an error if `dsn` is not a valid URL or cannot carry credentials.
    pub fn database_url(&self, dsn: &str) -> Result<String> {
        let mut dsn = Url::parse(dsn)?;

        if let Some(username) = &self.db_username {
            dsn.set_username(username)
                .map_err(|()| anyhow!("Error setting username"))?;
        }

        if let Some(password) = &self.db_password {
            dsn.set_password(Some(password.expose_secret()))
                .map_err(|()| anyhow!("Error setting password"))?;
        }

        Ok(dsn.to_string())
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("db_username", &self.db_username)
            .field("db_password", &self.db_password.as_ref().map(|_| "***"))
            .finish()
    }
}
