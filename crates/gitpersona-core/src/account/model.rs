//! Account model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a saved account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    /// Create an account ID from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as a number, if it is one.
    #[must_use]
    pub fn numeric(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    /// Generate an id above `last_issued` that is not present in `existing`.
    ///
    /// Starts from the current Unix time in milliseconds, or one past
    /// `last_issued` when that is later, and counts upward past any collision.
    #[must_use]
    pub fn generate<'a, I>(existing: I, now: DateTime<Utc>, last_issued: i64) -> Self
    where
        I: IntoIterator<Item = &'a Self> + Clone,
    {
        let mut candidate = now.timestamp_millis().max(last_issued.saturating_add(1));
        loop {
            let id = Self(candidate.to_string());
            if !existing.clone().into_iter().any(|other| *other == id) {
                return id;
            }
            candidate += 1;
        }
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A saved name/email pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier, assigned on creation.
    pub id: AccountId,
    /// Display name written to `user.name`.
    pub name: String,
    /// Email written to `user.email`. Unique across the store.
    pub email: String,
    /// When the account was saved.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create an account record.
    ///
    /// Callers are expected to have validated and trimmed `name` and `email`.
    #[must_use]
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at,
        }
    }
}
