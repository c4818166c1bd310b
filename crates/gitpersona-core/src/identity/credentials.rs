//! Cached credential erasure.
//!
//! After the identity changes, the credential cached for the forge host is
//! removed so the next push prompts for the matching account. Which tool does
//! that depends on the platform:
//! - Windows: `cmdkey` against the Credential Manager entry
//! - macOS: Git Credential Manager, then the `osxkeychain` helper
//! - Linux and other Unix: Git Credential Manager
//!
//! Failures here never propagate; they fold into an [`EraseOutcome`].

use tracing::{debug, info, warn};

use super::model::{EraseAttempt, EraseOutcome};
use crate::command::{CommandRunner, CommandSpec};

/// Operating system family, which selects the erase commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows.
    Windows,
    /// macOS.
    MacOs,
    /// Linux and other Unix-likes.
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }
}

/// Commands to try, in order, to erase the credential cached for `host`.
///
/// The first success ends the sequence.
#[must_use]
pub fn erase_plan(platform: Platform, git: &str, host: &str) -> Vec<CommandSpec> {
    let credential_manager = || {
        CommandSpec::new(git)
            .arg("credential-manager")
            .arg("delete")
            .arg(host)
    };

    match platform {
        Platform::Windows => {
            vec![CommandSpec::new("cmdkey").arg(format!("/delete:git:{host}"))]
        }
        Platform::MacOs => vec![
            credential_manager(),
            CommandSpec::new(git)
                .arg("credential-osxkeychain")
                .arg("erase")
                .stdin(credential_description(host)),
        ],
        Platform::Other => vec![credential_manager()],
    }
}

/// Run `plan` until one command succeeds.
pub async fn erase_credentials<R: CommandRunner>(runner: &R, plan: &[CommandSpec]) -> EraseOutcome {
    if plan.is_empty() {
        return EraseOutcome::NotAttempted;
    }

    let mut failed = Vec::new();
    for command in plan {
        match runner.run(command).await {
            Ok(_) => {
                info!(command = %command, "Cached credential erased");
                return EraseOutcome::Erased {
                    command: command.to_string(),
                    failed,
                };
            }
            Err(e) => {
                debug!(command = %command, "Credential erase attempt failed: {e}");
                failed.push(EraseAttempt {
                    command: command.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    warn!(
        "Could not erase cached credentials ({} attempts); remove them manually from the OS credential store",
        failed.len()
    );
    EraseOutcome::Failed { attempts: failed }
}

/// Git credential-helper input naming `host`, e.g. `protocol=https\nhost=github.com\n\n`.
fn credential_description(host: &str) -> String {
    let (protocol, rest) = host.split_once("://").unwrap_or(("https", host));
    let hostname = rest.trim_end_matches('/');
    format!("protocol={protocol}\nhost={hostname}\n\n")
}
