//! Reading and writing the global git identity.

use tracing::{info, warn};

use super::credentials::{Platform, erase_credentials, erase_plan};
use super::model::{EraseOutcome, GitIdentity, UpdateReport};
use crate::account::validate_identity;
use crate::command::{CommandError, CommandRunner, CommandSpec, SystemRunner};
use crate::config::Config;
use crate::{Error, Result};

const NAME_KEY: &str = "user.name";
const EMAIL_KEY: &str = "user.email";

/// Reads and replaces `user.name` / `user.email` in git's global config.
#[derive(Debug)]
pub struct IdentityUpdater<R = SystemRunner> {
    runner: R,
    git: String,
    credential_host: String,
    erase_credentials: bool,
    platform: Platform,
}

impl IdentityUpdater<SystemRunner> {
    /// Create an updater that runs real processes, honouring `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(SystemRunner::new(config.command_timeout()), config)
    }
}

impl<R: CommandRunner> IdentityUpdater<R> {
    /// Create an updater over a custom runner.
    #[must_use]
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            git: config.git_program.clone(),
            credential_host: config.credential_host.clone(),
            erase_credentials: config.erase_credentials,
            platform: Platform::current(),
        }
    }

    /// Override the platform used to pick erase commands.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// The underlying command runner.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Read the current global identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigUnavailable`] if either key cannot be read,
    /// e.g. git is missing or the key is unset.
    pub async fn read(&self) -> Result<GitIdentity> {
        let name = self.get(NAME_KEY).await.map_err(Error::ConfigUnavailable)?;
        let email = self.get(EMAIL_KEY).await.map_err(Error::ConfigUnavailable)?;
        Ok(GitIdentity::new(name.trim(), email.trim()))
    }

    /// Replace the global identity, then erase the cached forge credential.
    ///
    /// Credential erasure is best effort and its outcome is reported in the
    /// returned [`UpdateReport`], never as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before running anything if the input is
    /// invalid, or [`Error::UpdateFailed`] if either `git config` write fails.
    pub async fn update(&self, name: &str, email: &str) -> Result<UpdateReport> {
        let (name, email) = validate_identity(name, email).map_err(Error::Validation)?;

        self.set(NAME_KEY, &name).await.map_err(Error::UpdateFailed)?;
        self.set(EMAIL_KEY, &email).await.map_err(Error::UpdateFailed)?;
        info!("Global git identity set to {name} <{email}>");

        let credentials = if self.erase_credentials {
            let plan = erase_plan(self.platform, &self.git, &self.credential_host);
            erase_credentials(&self.runner, &plan).await
        } else {
            EraseOutcome::NotAttempted
        };

        if matches!(credentials, EraseOutcome::Failed { .. }) {
            warn!(
                "Identity updated but cached credentials for {} remain",
                self.credential_host
            );
        }

        Ok(UpdateReport {
            identity: GitIdentity::new(name, email),
            credentials,
        })
    }

    async fn get(&self, key: &str) -> std::result::Result<String, CommandError> {
        let command = CommandSpec::new(&self.git).args(["config", "--global", "--get", key]);
        self.runner.run(&command).await
    }

    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), CommandError> {
        let command = CommandSpec::new(&self.git).args(["config", "--global", key, value]);
        self.runner.run(&command).await.map(|_| ())
    }
}
