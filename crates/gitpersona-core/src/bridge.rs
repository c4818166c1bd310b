//! Request/response boundary for front ends.
//!
//! A front end (GUI, CLI, or a JSON-lines pipe) sends one [`Request`] and
//! receives one [`Reply`]. Failures never escape as errors here; they become
//! [`Reply::Error`] with a machine-readable [`ErrorKind`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::account::{Account, AccountId, AccountRepository};
use crate::command::{CommandRunner, SystemRunner};
use crate::config::Config;
use crate::error::{Error, ErrorKind};
use crate::identity::{GitIdentity, IdentityUpdater, UpdateReport};

/// One boundary operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Request {
    /// Read the global identity.
    GetIdentity,
    /// Replace the global identity and erase cached credentials.
    UpdateIdentity {
        /// New `user.name`.
        name: String,
        /// New `user.email`.
        email: String,
    },
    /// List saved accounts.
    ListAccounts,
    /// Save a new account.
    SaveAccount {
        /// Account name.
        name: String,
        /// Account email.
        email: String,
    },
    /// Delete a saved account.
    DeleteAccount {
        /// Id of the account to delete.
        id: AccountId,
    },
}

/// Data carried by a successful reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Result of `get-identity`.
    Identity(GitIdentity),
    /// Result of `update-identity`.
    Update(UpdateReport),
    /// Result of `list-accounts`.
    Accounts(Vec<Account>),
    /// The account created by `save-account` or removed by `delete-account`.
    Account(Account),
}

/// Outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Reply {
    /// The operation succeeded.
    Ok {
        /// Operation-specific result.
        data: Payload,
        /// Optional human-readable summary.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The operation failed.
    Error {
        /// Failure category.
        kind: ErrorKind,
        /// Human-readable explanation.
        message: String,
    },
}

impl Reply {
    fn ok(data: Payload, message: Option<&str>) -> Self {
        Self::Ok {
            data,
            message: message.map(str::to_string),
        }
    }

    /// Build a failure reply; storage errors are prefixed with `context`.
    fn failure(context: &str, error: &Error) -> Self {
        let kind = error.kind();
        let message = if kind == ErrorKind::Storage {
            format!("{context}: {error}")
        } else {
            error.to_string()
        };
        Self::Error { kind, message }
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// The human-readable message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok { message, .. } => message.as_deref(),
            Self::Error { message, .. } => Some(message),
        }
    }
}

/// Dispatches [`Request`]s to the account store and identity updater.
#[derive(Debug)]
pub struct Bridge<R = SystemRunner> {
    accounts: AccountRepository,
    identity: IdentityUpdater<R>,
}

impl Bridge<SystemRunner> {
    /// Wire up the production store and updater from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            AccountRepository::new(config.accounts_path()),
            IdentityUpdater::from_config(config),
        )
    }
}

impl<R: CommandRunner> Bridge<R> {
    /// Create a bridge over explicit components.
    #[must_use]
    pub const fn new(accounts: AccountRepository, identity: IdentityUpdater<R>) -> Self {
        Self { accounts, identity }
    }

    /// The saved-account store.
    pub const fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    /// The identity updater.
    pub const fn identity(&self) -> &IdentityUpdater<R> {
        &self.identity
    }

    /// Run one request to completion.
    pub async fn handle(&self, request: Request) -> Reply {
        debug!(?request, "handling request");
        match request {
            Request::GetIdentity => self.get_identity().await,
            Request::UpdateIdentity { name, email } => self.update_identity(&name, &email).await,
            Request::ListAccounts => self.list_accounts().await,
            Request::SaveAccount { name, email } => self.save_account(&name, &email).await,
            Request::DeleteAccount { id } => self.delete_account(&id).await,
        }
    }

    /// `get-identity`.
    pub async fn get_identity(&self) -> Reply {
        match self.identity.read().await {
            Ok(identity) => Reply::ok(Payload::Identity(identity), None),
            Err(e) => Reply::failure("Failed to read git configuration", &e),
        }
    }

    /// `update-identity`.
    pub async fn update_identity(&self, name: &str, email: &str) -> Reply {
        match self.identity.update(name, email).await {
            Ok(report) => {
                let message = report.message();
                Reply::ok(Payload::Update(report), Some(message))
            }
            Err(e) => Reply::failure("Failed to update git configuration", &e),
        }
    }

    /// `list-accounts`.
    pub async fn list_accounts(&self) -> Reply {
        Reply::ok(Payload::Accounts(self.accounts.list().await), None)
    }

    /// `save-account`.
    pub async fn save_account(&self, name: &str, email: &str) -> Reply {
        match self.accounts.add(name, email).await {
            Ok(account) => Reply::ok(Payload::Account(account), Some("Account saved.")),
            Err(e) => Reply::failure("Failed to save account", &e),
        }
    }

    /// `delete-account`.
    pub async fn delete_account(&self, id: &AccountId) -> Reply {
        match self.accounts.remove(id).await {
            Ok(account) => Reply::ok(Payload::Account(account), Some("Account deleted.")),
            Err(e) => Reply::failure("Failed to delete account", &e),
        }
    }
}
