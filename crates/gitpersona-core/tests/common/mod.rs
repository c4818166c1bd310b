//! Shared helpers for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Mutex;

use gitpersona_core::{CommandError, CommandRunner, CommandSpec};

type Rule = Box<dyn Fn(&CommandSpec) -> Result<String, CommandError> + Send + Sync>;

/// Runner that answers from a closure and records every command it sees.
pub struct ScriptedRunner {
    rule: Rule,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new(rule: impl Fn(&CommandSpec) -> Result<String, CommandError> + Send + Sync + 'static) -> Self {
        Self {
            rule: Box::new(rule),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command succeeds with empty output.
    pub fn succeeding() -> Self {
        Self::new(|_| Ok(String::new()))
    }

    /// Every command fails.
    pub fn failing() -> Self {
        Self::new(|spec| Err(failure(spec)))
    }

    /// `git config` succeeds, everything else fails.
    pub fn config_only() -> Self {
        Self::new(|spec| {
            if is_git_config(spec) {
                Ok(String::new())
            } else {
                Err(failure(spec))
            }
        })
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn rendered_calls(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &CommandSpec) -> Result<String, CommandError> {
        self.calls.lock().unwrap().push(command.clone());
        (self.rule)(command)
    }
}

pub fn is_git_config(spec: &CommandSpec) -> bool {
    spec.args.first().map(String::as_str) == Some("config")
}

pub fn failure(spec: &CommandSpec) -> CommandError {
    CommandError::Failed {
        command: spec.to_string(),
        status: "exit status: 1".to_string(),
        stderr: String::new(),
    }
}
