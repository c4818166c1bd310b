//! Application configuration.
//!
//! Settings live in a small JSON file under the platform config directory.
//! A missing file means "use the defaults"; every field is optional on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// Directory name used under the platform config/data directories.
pub const APP_DIR_NAME: &str = "gitpersona";

/// File name of the settings file.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// File name of the saved-accounts store.
pub const ACCOUNTS_FILE_NAME: &str = "accounts.json";

/// Default timeout applied to every external command.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 10;

/// Host whose cached credential is erased after an identity change.
pub const DEFAULT_CREDENTIAL_HOST: &str = "https://github.com";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Location of the saved-accounts store (defaults to the data directory).
    pub accounts_file: Option<PathBuf>,
    /// Program used for `git config` and credential helpers.
    pub git_program: String,
    /// Upper bound on any single external command, in seconds.
    pub command_timeout_secs: u64,
    /// Credential host erased after an identity update.
    pub credential_host: String,
    /// Whether to attempt credential erasure at all.
    pub erase_credentials: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accounts_file: None,
            git_program: "git".to_string(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            credential_host: DEFAULT_CREDENTIAL_HOST.to_string(),
            erase_credentials: true,
        }
    }
}

impl Config {
    /// Default settings file location: `<config_dir>/gitpersona/config.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Default store location: `<data_dir>/gitpersona/accounts.json`.
    #[must_use]
    pub fn default_accounts_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(ACCOUNTS_FILE_NAME)
    }

    /// Loads settings from `path`, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the parsed settings are invalid.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Writes settings to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Checks values that would make the runtime misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.git_program.trim().is_empty() {
            return Err(crate::Error::Config("gitProgram must not be empty".into()));
        }
        if self.command_timeout_secs == 0 {
            return Err(crate::Error::Config(
                "commandTimeoutSecs must be at least 1".into(),
            ));
        }
        if self.credential_host.trim().is_empty() {
            return Err(crate::Error::Config(
                "credentialHost must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Resolved location of the saved-accounts store.
    #[must_use]
    pub fn accounts_path(&self) -> PathBuf {
        self.accounts_file
            .clone()
            .unwrap_or_else(Self::default_accounts_path)
    }

    /// Command timeout as a [`Duration`].
    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
