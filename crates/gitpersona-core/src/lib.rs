//! # gitpersona-core
//!
//! Core logic for `gitpersona`, a switcher for the global git identity.
//!
//! This crate provides:
//! - Saved accounts persisted to a JSON file
//! - Reading and writing `user.name` / `user.email` via `git config --global`
//! - Best-effort erasure of the cached GitHub credential after a switch
//! - A request/reply [`Bridge`] exposing those operations to front ends

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod bridge;
pub mod command;
pub mod config;
mod error;
pub mod identity;

pub use account::{
    Account, AccountId, AccountRepository, ValidationError, ValidationResult, is_valid_email,
    validate_identity,
};
pub use bridge::{Bridge, Payload, Reply, Request};
pub use command::{CommandError, CommandRunner, CommandSpec, SystemRunner};
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use identity::{
    EraseAttempt, EraseOutcome, GitIdentity, IdentityUpdater, Platform, UpdateReport,
};
