//! Saved account management.
//!
//! Provides the account model, name/email validation, and the JSON-file
//! backed repository.

mod model;
mod repository;
mod validation;

pub use model::{Account, AccountId};
pub use repository::AccountRepository;
pub use validation::{ValidationError, ValidationResult, is_valid_email, validate_identity};
