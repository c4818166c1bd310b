//! Account storage repository.
//!
//! The store is a single pretty-printed JSON array. Every mutation reads the
//! whole file, edits it in memory and writes it back in full.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::model::{Account, AccountId};
use super::validation::validate_identity;
use crate::{Error, Result};

/// Repository for saved accounts backed by a JSON file.
#[derive(Debug)]
pub struct AccountRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process and holds the
    /// highest numeric id issued or seen, so a deleted id is never reissued.
    last_issued: Mutex<i64>,
}

impl AccountRepository {
    /// Create a repository over the given file. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_issued: Mutex::new(0),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get all accounts in insertion order.
    ///
    /// A missing, unreadable or corrupt file yields an empty list; the cause
    /// is logged.
    pub async fn list(&self) -> Vec<Account> {
        let mut last_issued = self.last_issued.lock().await;
        match self.load().await {
            Ok(accounts) => {
                note_ids(&mut last_issued, &accounts);
                accounts
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to load account list: {e}");
                Vec::new()
            }
        }
    }

    /// Get account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    pub async fn get(&self, id: &AccountId) -> Result<Option<Account>> {
        let mut last_issued = self.last_issued.lock().await;
        let accounts = self.load().await?;
        note_ids(&mut last_issued, &accounts);
        Ok(accounts.into_iter().find(|account| account.id == *id))
    }

    /// Save a new account.
    ///
    /// Both fields are trimmed before validation and storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for empty fields or a malformed email,
    /// [`Error::DuplicateEmail`] if the email is already saved, or a storage
    /// error if the store cannot be read or written.
    pub async fn add(&self, name: &str, email: &str) -> Result<Account> {
        let (name, email) = validate_identity(name, email).map_err(Error::Validation)?;

        let mut last_issued = self.last_issued.lock().await;
        let mut accounts = self.load().await?;
        note_ids(&mut last_issued, &accounts);

        if accounts.iter().any(|account| account.email == email) {
            debug!("Rejected duplicate account {email}");
            return Err(Error::DuplicateEmail(email));
        }

        let now = Utc::now();
        let existing = accounts.iter().map(|account| &account.id);
        let id = AccountId::generate(existing, now, *last_issued);
        let account = Account::new(id, name, email, now);
        accounts.push(account.clone());

        self.persist(&accounts).await?;
        note_ids(&mut last_issued, std::slice::from_ref(&account));
        info!("Saved account {} ({})", account.id, account.email);
        Ok(account)
    }

    /// Delete an account, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccountNotFound`] if no account has this id, or a
    /// storage error if the store cannot be read or written.
    pub async fn remove(&self, id: &AccountId) -> Result<Account> {
        let mut last_issued = self.last_issued.lock().await;
        let mut accounts = self.load().await?;
        note_ids(&mut last_issued, &accounts);

        let Some(index) = accounts.iter().position(|account| account.id == *id) else {
            return Err(Error::AccountNotFound(id.to_string()));
        };
        let removed = accounts.remove(index);

        self.persist(&accounts).await?;
        info!("Deleted account {} ({})", removed.id, removed.email);
        Ok(removed)
    }

    /// Read the whole store. A missing file is an empty store.
    async fn load(&self) -> Result<Vec<Account>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No account store yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&contents)?)
    }

    /// Replace the store with `accounts`.
    ///
    /// Writes a sibling temp file and renames it into place.
    async fn persist(&self, accounts: &[Account]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(accounts)?;

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        tokio::fs::write(&tmp_path, contents).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!(path = %self.path.display(), count = accounts.len(), "Account store written");
        Ok(())
    }
}

/// Raise the high-water mark to the largest numeric id in `accounts`.
fn note_ids(last_issued: &mut i64, accounts: &[Account]) {
    if let Some(highest) = accounts.iter().filter_map(|account| account.id.numeric()).max() {
        *last_issued = (*last_issued).max(highest);
    }
}
