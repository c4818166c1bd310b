//! Global git identity management.
//!
//! Reads and writes `user.name` / `user.email` through `git config --global`
//! and clears the cached forge credential after a change.

pub mod credentials;
mod model;
mod updater;

pub use credentials::{Platform, erase_credentials, erase_plan};
pub use model::{EraseAttempt, EraseOutcome, GitIdentity, UpdateReport};
pub use updater::IdentityUpdater;
