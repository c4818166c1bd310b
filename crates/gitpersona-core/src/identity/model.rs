//! Identity model types.

use serde::{Deserialize, Serialize};

/// The global `user.name` / `user.email` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitIdentity {
    /// Value of `user.name`.
    pub name: String,
    /// Value of `user.email`.
    pub email: String,
}

impl GitIdentity {
    /// Create an identity pair.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for GitIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// One failed credential erase command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraseAttempt {
    /// Command line that was run.
    pub command: String,
    /// Why it failed.
    pub error: String,
}

/// Result of the best-effort credential erasure step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum EraseOutcome {
    /// A command in the platform sequence succeeded.
    Erased {
        /// The command that succeeded.
        command: String,
        /// Earlier commands that failed before it.
        failed: Vec<EraseAttempt>,
    },
    /// Every command in the platform sequence failed.
    Failed {
        /// All attempts, in order.
        attempts: Vec<EraseAttempt>,
    },
    /// Erasure was disabled or the platform has nothing to run.
    NotAttempted,
}

impl EraseOutcome {
    /// Whether a cached credential was erased.
    #[must_use]
    pub const fn is_erased(&self) -> bool {
        matches!(self, Self::Erased { .. })
    }
}

/// Successful identity update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    /// The identity now in effect.
    pub identity: GitIdentity,
    /// What happened to the cached credential.
    pub credentials: EraseOutcome,
}

impl UpdateReport {
    /// Human-readable summary.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match &self.credentials {
            EraseOutcome::Erased { .. } => {
                "Git identity updated and cached GitHub credentials erased."
            }
            EraseOutcome::Failed { .. } => "Git identity updated (credential erasure failed).",
            EraseOutcome::NotAttempted => "Git identity updated (credential erasure skipped).",
        }
    }
}
