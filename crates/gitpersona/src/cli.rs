//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Switch the global git identity between saved accounts.
#[derive(Debug, Parser)]
#[command(name = "gitpersona", version, about)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory).
    #[arg(long, global = true, env = "GITPERSONA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Saved-accounts file, overriding the settings file.
    #[arg(long, global = true, env = "GITPERSONA_ACCOUNTS_FILE")]
    pub accounts_file: Option<PathBuf>,

    /// Print raw JSON replies instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current global git identity.
    Show,
    /// Set the global git identity and erase cached GitHub credentials.
    Set(IdentityArgs),
    /// Manage saved accounts.
    #[command(subcommand)]
    Accounts(AccountsCommand),
    /// Switch the global identity to a saved account.
    Use {
        /// Id of the saved account.
        id: String,
    },
    /// Answer JSON requests on stdin, one per line.
    Serve,
    /// Manage the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Settings-file commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write the effective settings to the settings file.
    Init {
        /// Overwrite an existing settings file.
        #[arg(long)]
        force: bool,
    },
}

/// Saved-account commands.
#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    /// List saved accounts.
    List,
    /// Save a new account.
    Add(IdentityArgs),
    /// Delete a saved account.
    Remove {
        /// Id of the saved account.
        id: String,
    },
}

/// A name/email pair.
#[derive(Debug, Args)]
pub struct IdentityArgs {
    /// User name.
    #[arg(long)]
    pub name: String,
    /// Email address.
    #[arg(long)]
    pub email: String,
}
