// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace lifecycle manager.

use std::path::PathBuf;

use af_adapters::{GitWorktreeBackend, WorkspaceBackend};
use af_core::{TaskId, WorkspaceRecord, WorkspaceStatus};
use af_storage::{JsonFileStore, WorkspaceStore, WorkspaceTable};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::audit::WorkspaceAudit;
use crate::config::{CleanupOptions, ManagerConfig, WorkspaceLayout};
use crate::error::WorkspaceError;

/// Allocates, tracks, and reclaims one git worktree per task.
///
/// Every mutating operation holds the table lock across the backend call and
/// the save, so the concurrency cap check and the insert that follows it are
/// atomic with respect to other callers. The persisted table is only written
/// after the backend call succeeds.
pub struct WorkspaceManager<B, S> {
    layout: WorkspaceLayout,
    max_concurrent: usize,
    backend: B,
    store: S,
    table: Mutex<WorkspaceTable>,
}

impl WorkspaceManager<GitWorktreeBackend, JsonFileStore> {
    /// Manager for a real repository, persisting to the configured state file.
    pub fn open(config: ManagerConfig) -> Result<Self, WorkspaceError> {
        let layout = config.layout()?;
        let backend = GitWorktreeBackend::new(&layout.repo_root);
        let store = JsonFileStore::new(&layout.state_path);
        Self::new(config, backend, store)
    }
}

impl<B: WorkspaceBackend, S: WorkspaceStore> WorkspaceManager<B, S> {
    /// Build a manager and load its table from `store`.
    ///
    /// A missing table starts empty. An unreadable one is logged, moved
    /// aside, and replaced by an empty table rather than failing.
    pub fn new(config: ManagerConfig, backend: B, store: S) -> Result<Self, WorkspaceError> {
        let layout = config.layout()?;
        let table = load_table(&store);
        info!(
            repo = %layout.repo_root.display(),
            tracked = table.len(),
            max_concurrent = config.max_concurrent,
            "workspace manager ready"
        );
        Ok(Self {
            layout,
            max_concurrent: config.max_concurrent,
            backend,
            store,
            table: Mutex::new(table),
        })
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Allocate a workspace for `task_id` and return its absolute path.
    pub async fn create_workspace(
        &self,
        task_id: &str,
        creator: &str,
    ) -> Result<PathBuf, WorkspaceError> {
        let task_id = TaskId::parse(task_id)?;
        let mut table = self.table.lock().await;

        if table.contains(&task_id) {
            return Err(WorkspaceError::AlreadyExists(task_id));
        }
        if table.len() >= self.max_concurrent {
            info!(%task_id, max = self.max_concurrent, "workspace limit reached");
            return Err(WorkspaceError::LimitReached { max: self.max_concurrent });
        }

        let record =
            WorkspaceRecord::new(task_id.clone(), &self.layout.base_dir, creator, Utc::now());
        if let Err(e) = self.backend.allocate(&record.workspace_path, &record.branch_name).await {
            error!(%task_id, error = %e, "failed to allocate workspace");
            return Err(e.into());
        }

        let path = record.workspace_path.clone();
        let branch = record.branch_name.clone();
        table.insert(record);
        if let Err(e) = self.store.save(&table) {
            error!(%task_id, error = %e, "failed to persist workspace table, rolling back");
            table.remove(&task_id);
            if let Err(undo) = self.backend.reclaim(&path, Some(branch.as_str()), true).await {
                warn!(%task_id, error = %undo, "failed to reclaim workspace after rollback");
            }
            return Err(e.into());
        }

        info!(%task_id, path = %path.display(), %branch, creator, "workspace created");
        Ok(path)
    }

    /// Remove the workspace for `task_id` and stop tracking it.
    ///
    /// The record is dropped as soon as the worktree is gone, even if the
    /// branch deletion that follows fails; that failure is still returned.
    /// A worktree already removed outside the manager counts as removed.
    pub async fn cleanup_workspace(
        &self,
        task_id: &str,
        options: CleanupOptions,
    ) -> Result<bool, WorkspaceError> {
        let task_id = TaskId::parse(task_id)?;
        let mut table = self.table.lock().await;

        let (path, branch) = match table.get(&task_id) {
            Some(record) => (record.workspace_path.clone(), record.branch_name.clone()),
            None => return Err(WorkspaceError::NotFound(task_id)),
        };

        if let Err(e) = self.backend.remove_worktree(&path, options.force).await {
            error!(%task_id, force = options.force, error = %e, "failed to remove worktree");
            return Err(e.into());
        }

        let branch_result = if options.delete_branch {
            self.backend.delete_branch(&branch).await
        } else {
            Ok(())
        };

        table.remove(&task_id);
        self.store.save(&table)?;

        if let Err(e) = branch_result {
            warn!(%task_id, %branch, error = %e, "worktree removed but branch deletion failed");
            return Err(e.into());
        }

        info!(
            %task_id,
            path = %path.display(),
            force = options.force,
            delete_branch = options.delete_branch,
            "workspace cleaned up"
        );
        Ok(true)
    }

    /// All tracked records, ordered by task id.
    pub async fn list_workspaces(&self) -> Vec<WorkspaceRecord> {
        self.table.lock().await.records().cloned().collect()
    }

    /// Tracked record for `task_id`, if any. Invalid ids are never tracked.
    pub async fn get_workspace(&self, task_id: &str) -> Option<WorkspaceRecord> {
        let task_id = TaskId::parse(task_id).ok()?;
        self.table.lock().await.get(&task_id).cloned()
    }

    /// Set the status (and optionally the review URL) of a tracked workspace.
    pub async fn update_status(
        &self,
        task_id: &str,
        status: WorkspaceStatus,
        pr_url: Option<&str>,
    ) -> Result<(), WorkspaceError> {
        let task_id = TaskId::parse(task_id)?;
        let mut table = self.table.lock().await;

        let previous = match table.get(&task_id) {
            Some(record) => record.clone(),
            None => return Err(WorkspaceError::NotFound(task_id)),
        };
        if !previous.status.can_transition_to(status) {
            return Err(WorkspaceError::InvalidTransition {
                task_id,
                from: previous.status,
                to: status,
            });
        }

        let mut updated = previous.clone();
        updated.status = status;
        if let Some(url) = pr_url {
            updated.pr_url = Some(url.to_string());
        }
        table.insert(updated);

        if let Err(e) = self.store.save(&table) {
            table.insert(previous);
            return Err(e.into());
        }

        info!(%task_id, %status, pr_url, "workspace status updated");
        Ok(())
    }

    /// Number of tracked workspaces (all statuses count toward the cap).
    pub async fn tracked_count(&self) -> usize {
        self.table.lock().await.len()
    }

    /// How many more workspaces can be created before hitting the cap.
    pub async fn capacity_remaining(&self) -> usize {
        self.max_concurrent.saturating_sub(self.tracked_count().await)
    }

    /// Compare the tracked table with the backend's list of worktrees.
    pub async fn audit(&self) -> Result<WorkspaceAudit, WorkspaceError> {
        let table = self.table.lock().await;
        let entries = self.backend.list().await?;
        let audit = WorkspaceAudit::compare(&table, &entries);
        if !audit.is_clean() {
            warn!(
                missing = audit.missing.len(),
                untracked = audit.untracked.len(),
                "workspace table disagrees with git worktree list"
            );
        }
        Ok(audit)
    }
}

fn load_table<S: WorkspaceStore>(store: &S) -> WorkspaceTable {
    match store.load() {
        Ok(table) => table,
        Err(e) if e.is_corrupt() => {
            warn!(error = %e, "workspace table is unreadable, starting empty");
            match store.quarantine() {
                Ok(Some(bak)) => {
                    warn!(backup = %bak.display(), "moved unreadable workspace table aside")
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "failed to move unreadable workspace table aside"),
            }
            WorkspaceTable::new()
        }
        Err(e) => {
            warn!(error = %e, "failed to read workspace table, starting empty");
            WorkspaceTable::new()
        }
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
