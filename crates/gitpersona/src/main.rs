//! `gitpersona` - switch the global git identity between saved accounts.
//!
//! Thin host around `gitpersona-core`: parses arguments, loads settings and
//! forwards each command to the core `Bridge`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod output;
mod serve;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gitpersona_core::{AccountId, Bridge, Config, ErrorKind, Reply};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{AccountsCommand, Cli, Command, ConfigCommand};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitpersona=warn,gitpersona_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)
        .await
        .with_context(|| format!("failed to load settings from {}", config_path.display()))?;
    if let Some(path) = cli.accounts_file {
        config.accounts_file = Some(path);
    }
    debug!(accounts = %config.accounts_path().display(), "settings resolved");

    let bridge = Bridge::from_config(&config);

    let reply = match cli.command {
        Command::Serve => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            serve::run(&bridge, stdin, tokio::io::stdout()).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Config(ConfigCommand::Init { force }) => {
            init_config(&config_path, &config, force).await?;
            println!("Wrote settings to {}", config_path.display());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Show => bridge.get_identity().await,
        Command::Set(args) => bridge.update_identity(&args.name, &args.email).await,
        Command::Accounts(AccountsCommand::List) => bridge.list_accounts().await,
        Command::Accounts(AccountsCommand::Add(args)) => {
            bridge.save_account(&args.name, &args.email).await
        }
        Command::Accounts(AccountsCommand::Remove { id }) => {
            bridge.delete_account(&AccountId::new(id)).await
        }
        Command::Use { id } => use_account(&bridge, &AccountId::new(id)).await,
    };

    output::print(&reply, cli.json)?;
    Ok(if reply.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Write `config` to `path`, refusing to replace an existing file unless `force`.
async fn init_config(path: &Path, config: &Config, force: bool) -> Result<()> {
    let exists = tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("failed to check {}", path.display()))?;
    if exists && !force {
        anyhow::bail!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        );
    }
    config
        .save(path)
        .await
        .with_context(|| format!("failed to write settings to {}", path.display()))
}

/// Apply a saved account as the global identity.
async fn use_account(bridge: &Bridge, id: &AccountId) -> Reply {
    match bridge.accounts().get(id).await {
        Ok(Some(account)) => bridge.update_identity(&account.name, &account.email).await,
        Ok(None) => Reply::Error {
            kind: ErrorKind::NotFound,
            message: format!("Account not found: {id}"),
        },
        Err(e) => Reply::Error {
            kind: e.kind(),
            message: format!("Failed to load saved accounts: {e}"),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_config_writes_then_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gitpersona").join("config.json");
        let config = Config {
            erase_credentials: false,
            ..Config::default()
        };

        init_config(&path, &config, false).await.unwrap();
        assert_eq!(Config::load(&path).await.unwrap(), config);

        assert!(init_config(&path, &Config::default(), false).await.is_err());
        assert_eq!(Config::load(&path).await.unwrap(), config);

        init_config(&path, &Config::default(), true).await.unwrap();
        assert_eq!(Config::load(&path).await.unwrap(), Config::default());
    }
}
