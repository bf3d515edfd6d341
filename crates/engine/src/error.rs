// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use af_adapters::BackendError;
use af_core::{InvalidTaskId, TaskId, WorkspaceStatus};
use af_storage::StoreError;
use thiserror::Error;

/// Errors from workspace manager operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    InvalidTaskId(#[from] InvalidTaskId),
    #[error("workspace already exists for task {0}")]
    AlreadyExists(TaskId),
    #[error("no workspace tracked for task {0}")]
    NotFound(TaskId),
    #[error("workspace limit reached: {max} already tracked")]
    LimitReached { max: usize },
    #[error("workspace {task_id} cannot move from {from} to {to}")]
    InvalidTransition { task_id: TaskId, from: WorkspaceStatus, to: WorkspaceStatus },
    #[error("version control failure: {0}")]
    ToolFailure(#[from] BackendError),
    #[error("workspace table error: {0}")]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkspaceError {
    /// Conditions an orchestrator is expected to branch on (retry later,
    /// skip the task) rather than surface to an operator.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            WorkspaceError::InvalidTaskId(_)
                | WorkspaceError::AlreadyExists(_)
                | WorkspaceError::NotFound(_)
                | WorkspaceError::LimitReached { .. }
                | WorkspaceError::InvalidTransition { .. }
        )
    }
}
