//! Rendering replies for the terminal.

use anyhow::Result;
use gitpersona_core::{Account, EraseOutcome, Payload, Reply};

/// Print `reply` to stdout (or stderr for failures).
pub fn print(reply: &Reply, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
        return Ok(());
    }

    match reply {
        Reply::Ok { data, message } => {
            if let Some(message) = message {
                println!("{message}");
            }
            print_payload(data);
        }
        Reply::Error { message, .. } => eprintln!("error: {message}"),
    }
    Ok(())
}

fn print_payload(data: &Payload) {
    match data {
        Payload::Identity(identity) => println!("{identity}"),
        Payload::Update(report) => {
            println!("  identity: {}", report.identity);
            if let EraseOutcome::Failed { attempts } = &report.credentials {
                for attempt in attempts {
                    println!("  tried `{}`: {}", attempt.command, attempt.error);
                }
            }
        }
        Payload::Accounts(accounts) if accounts.is_empty() => println!("No saved accounts."),
        Payload::Accounts(accounts) => {
            for account in accounts {
                println!("{}", account_line(account));
            }
        }
        Payload::Account(account) => println!("  {}", account_line(account)),
    }
}

fn account_line(account: &Account) -> String {
    format!(
        "{}  {} <{}>  (saved {})",
        account.id,
        account.name,
        account.email,
        account.created_at.format("%Y-%m-%d")
    )
}
