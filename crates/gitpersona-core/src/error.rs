//! Error types for the core library.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::ValidationError;
use crate::command::CommandError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Name or email failed validation. No side effect was attempted.
    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A saved account already uses this email.
    #[error("An account with email {0} already exists")]
    DuplicateEmail(String),

    /// No saved account has this id.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The global git identity could not be read.
    #[error("Unable to read git configuration. Is git installed? ({0})")]
    ConfigUnavailable(#[source] CommandError),

    /// Writing the global git identity failed.
    #[error("Failed to update git configuration: {0}")]
    UpdateFailed(#[source] CommandError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Coarse category, suitable for callers that branch on failure type.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::DuplicateEmail(_) => ErrorKind::Duplicate,
            Self::AccountNotFound(_) => ErrorKind::NotFound,
            Self::ConfigUnavailable(_) => ErrorKind::ConfigUnavailable,
            Self::UpdateFailed(_) => ErrorKind::UpdateFailed,
            Self::Serde(_) | Self::Io(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Self::Validation(vec![error])
    }
}

/// Wire-level error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Bad input shape.
    Validation,
    /// Conflicting unique key.
    Duplicate,
    /// Missing key.
    NotFound,
    /// Identity could not be read.
    ConfigUnavailable,
    /// Identity could not be written.
    UpdateFailed,
    /// Store file could not be read or written.
    Storage,
    /// Invalid settings.
    Config,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
