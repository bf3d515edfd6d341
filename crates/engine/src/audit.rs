// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison of the tracked table against the version-control tool's view.

use af_adapters::WorktreeEntry;
use af_core::{TaskId, WORKSPACE_DIR_PREFIX};
use af_storage::WorkspaceTable;

/// Disagreements between the tracked table and `git worktree list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceAudit {
    /// Tracked tasks whose worktree the tool no longer reports
    pub missing: Vec<TaskId>,
    /// Workspace-named worktrees the table does not track
    pub untracked: Vec<WorktreeEntry>,
}

impl WorkspaceAudit {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.untracked.is_empty()
    }

    /// A record matches an entry by path or by branch, since the tool may
    /// report a canonicalized path (resolved symlinks) for the same worktree.
    pub(crate) fn compare(table: &WorkspaceTable, entries: &[WorktreeEntry]) -> Self {
        let matches = |path: &std::path::Path, branch: &str, entry: &WorktreeEntry| {
            entry.path == path || entry.branch.as_deref() == Some(branch)
        };

        let missing = table
            .records()
            .filter(|r| !entries.iter().any(|e| matches(&r.workspace_path, &r.branch_name, e)))
            .map(|r| r.task_id.clone())
            .collect();

        let untracked = entries
            .iter()
            .filter(|e| {
                e.path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(WORKSPACE_DIR_PREFIX))
            })
            .filter(|e| !table.records().any(|r| matches(&r.workspace_path, &r.branch_name, e)))
            .cloned()
            .collect();

        Self { missing, untracked }
    }
}
