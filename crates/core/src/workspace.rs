// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace records and lifecycle status.
//!
//! A workspace is an isolated git worktree bound to one task. Its directory
//! and branch names are derived from the task id and never stored
//! independently of it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::TaskId;

/// Prefix of every workspace directory name.
pub const WORKSPACE_DIR_PREFIX: &str = "agent-factory-";

/// Prefix of every workspace branch name.
pub const BRANCH_PREFIX: &str = "autonomous/";

/// Directory name (not path) of the workspace for `task_id`.
pub fn workspace_dir_name(task_id: &TaskId) -> String {
    format!("{}{}", WORKSPACE_DIR_PREFIX, task_id)
}

/// Branch name of the workspace for `task_id`.
pub fn branch_name(task_id: &TaskId) -> String {
    format!("{}{}", BRANCH_PREFIX, task_id)
}

/// Status of a workspace in its lifecycle.
///
/// `Active` is the only non-terminal status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceStatus {
    #[default]
    Active,
    Merged,
    Failed,
    Abandoned,
}

crate::simple_display! {
    WorkspaceStatus {
        Active => "active",
        Merged => "merged",
        Failed => "failed",
        Abandoned => "abandoned",
    }
}

impl WorkspaceStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, WorkspaceStatus::Active)
    }

    /// Whether a record in this status may be moved to `next`.
    ///
    /// Active may move anywhere. A terminal status only accepts itself again.
    pub fn can_transition_to(self, next: WorkspaceStatus) -> bool {
        !self.is_terminal() || self == next
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown workspace status {0:?} (expected active, merged, failed or abandoned)")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for WorkspaceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(WorkspaceStatus::Active),
            "merged" => Ok(WorkspaceStatus::Merged),
            "failed" => Ok(WorkspaceStatus::Failed),
            "abandoned" => Ok(WorkspaceStatus::Abandoned),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A tracked workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub task_id: TaskId,
    pub workspace_path: PathBuf,
    pub branch_name: String,
    pub status: WorkspaceStatus,
    pub creator: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
}

impl WorkspaceRecord {
    /// New active record for `task_id` with its directory under `base_dir`.
    pub fn new(
        task_id: TaskId,
        base_dir: &Path,
        creator: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            workspace_path: base_dir.join(workspace_dir_name(&task_id)),
            branch_name: branch_name(&task_id),
            task_id,
            status: WorkspaceStatus::Active,
            creator: creator.into(),
            created_at,
            pr_url: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
