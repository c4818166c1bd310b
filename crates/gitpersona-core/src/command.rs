//! External command execution.
//!
//! Every git and credential-store invocation goes through a [`CommandRunner`].
//! The production runner, [`SystemRunner`], shells out via
//! [`tokio::process::Command`] with a bounded timeout; tests substitute a
//! scripted runner.

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Hides the console window of spawned children on Windows.
#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// A fully specified external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute (looked up on `PATH`).
    pub program: String,
    /// Arguments passed verbatim; no shell is involved.
    pub args: Vec<String>,
    /// Optional data written to the child's stdin before it is closed.
    pub stdin: Option<String>,
}

impl CommandSpec {
    /// Creates a command with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the data fed to stdin.
    #[must_use]
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Errors from running an external command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The process could not be started (missing binary, permissions).
    #[error("failed to run `{command}`: {reason}")]
    Spawn {
        /// Command line that was attempted.
        command: String,
        /// Underlying OS error.
        reason: String,
    },

    /// The process ran but exited unsuccessfully.
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        /// Command line that was run.
        command: String,
        /// Exit status description.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The process did not finish within the allotted time.
    #[error("`{command}` timed out after {}s", .timeout.as_secs())]
    Timeout {
        /// Command line that was run.
        command: String,
        /// Configured timeout.
        timeout: Duration,
    },
}

/// Executes external commands and returns their standard output.
pub trait CommandRunner: Send + Sync {
    /// Runs `command` to completion.
    ///
    /// Resolves to the captured stdout (lossily decoded as UTF-8) on a zero
    /// exit status.
    fn run(&self, command: &CommandSpec)
    -> impl Future<Output = Result<String, CommandError>> + Send;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    /// Creates a runner that kills children exceeding `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn execute(&self, spec: &CommandSpec) -> Result<String, CommandError> {
        let rendered = spec.to_string();

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(target_os = "windows")]
        cmd.creation_flags(CREATE_NO_WINDOW);

        debug!(command = %rendered, "spawning");

        let spawn_error = |e: std::io::Error| CommandError::Spawn {
            command: rendered.clone(),
            reason: e.to_string(),
        };

        let mut child = cmd.spawn().map_err(spawn_error)?;

        if let Some(input) = &spec.stdin
            && let Some(mut pipe) = child.stdin.take()
        {
            pipe.write_all(input.as_bytes())
                .await
                .map_err(spawn_error)?;
            // Dropping the handle closes stdin so the child sees EOF.
            drop(pipe);
        }

        let output = child.wait_with_output().await.map_err(spawn_error)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CommandError::Failed {
                command: rendered,
                status: output.status.to_string(),
                stderr,
            });
        }

        debug!(command = %rendered, "command succeeded");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_COMMAND_TIMEOUT_SECS))
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<String, CommandError> {
        match tokio::time::timeout(self.timeout, self.execute(command)).await {
            Ok(result) => result,
            Err(_) => Err(CommandError::Timeout {
                command: command.to_string(),
                timeout: self.timeout,
            }),
        }
    }
}
