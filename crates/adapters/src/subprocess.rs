// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution for version-control commands.

use std::path::Path;
use std::process::Output;

use thiserror::Error;
use tokio::process::Command;

/// Errors from running the version-control tool
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{command}: failed to spawn: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} failed ({}): {stderr}", exit_label(.code))]
    Failed { command: String, code: Option<i32>, stderr: String },
    #[error("{command}: unexpected output: {reason}")]
    Parse { command: String, reason: String },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit {code}"),
        None => "killed by signal".to_string(),
    }
}

impl BackendError {
    /// Captured error output of a failed command, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            BackendError::Failed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// `git -C <repo_root>` with inherited repository overrides removed.
pub fn git(repo_root: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo_root).env_remove("GIT_DIR").env_remove("GIT_WORK_TREE");
    cmd
}

/// Run `cmd` to completion, capturing stdout and stderr.
///
/// A non-zero exit becomes [`BackendError::Failed`] carrying the trimmed
/// stderr. The child is killed if the returned future is dropped, so callers
/// can bound a hung command with `tokio::time::timeout`.
pub async fn run(mut cmd: Command, description: &str) -> Result<Output, BackendError> {
    tracing::debug!(command = description, "running");
    cmd.kill_on_drop(true);
    let output = cmd
        .output()
        .await
        .map_err(|source| BackendError::Spawn { command: description.to_string(), source })?;

    if !output.status.success() {
        return Err(BackendError::Failed {
            command: description.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
