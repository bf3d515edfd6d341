// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory workspace backend for tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{WorkspaceBackend, WorktreeEntry};
use crate::subprocess::BackendError;

/// Recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Allocate { path: PathBuf, branch: String },
    RemoveWorktree { path: PathBuf, force: bool },
    DeleteBranch { branch: String },
    List,
}

#[derive(Debug)]
struct FakeWorktree {
    branch: String,
    dirty: bool,
}

#[derive(Debug, Default)]
struct FakeBackendState {
    worktrees: BTreeMap<PathBuf, FakeWorktree>,
    branches: BTreeSet<String>,
    calls: Vec<BackendCall>,
    fail_next: Option<String>,
    fail_branch_delete: Option<String>,
}

/// Fake backend that mimics git's refusal rules without touching disk.
///
/// Allocation fails on an existing path or branch. Removing a dirty
/// worktree fails without force; removing an unknown path or deleting an
/// unknown branch succeeds, as the git backend treats both as already gone.
#[derive(Clone, Default)]
pub struct FakeWorkspaceBackend {
    inner: Arc<Mutex<FakeBackendState>>,
}

impl FakeWorkspaceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BackendCall> {
        self.inner.lock().calls.clone()
    }

    /// Make the next allocate or worktree removal fail with `stderr`.
    pub fn fail_next(&self, stderr: impl Into<String>) {
        self.inner.lock().fail_next = Some(stderr.into());
    }

    /// Make the next branch deletion fail with `stderr`.
    pub fn fail_branch_delete(&self, stderr: impl Into<String>) {
        self.inner.lock().fail_branch_delete = Some(stderr.into());
    }

    /// Simulate uncommitted changes in the worktree at `path`.
    pub fn mark_dirty(&self, path: &Path) {
        if let Some(worktree) = self.inner.lock().worktrees.get_mut(path) {
            worktree.dirty = true;
        }
    }

    /// Drop a worktree as if someone ran `git worktree remove` by hand.
    pub fn remove_externally(&self, path: &Path) {
        self.inner.lock().worktrees.remove(path);
    }

    /// Register a worktree the caller never asked for.
    pub fn add_externally(&self, path: impl Into<PathBuf>, branch: impl Into<String>) {
        let branch = branch.into();
        let mut inner = self.inner.lock();
        inner.branches.insert(branch.clone());
        inner.worktrees.insert(path.into(), FakeWorktree { branch, dirty: false });
    }

    pub fn worktree_paths(&self) -> Vec<PathBuf> {
        self.inner.lock().worktrees.keys().cloned().collect()
    }

    pub fn has_branch(&self, branch: &str) -> bool {
        self.inner.lock().branches.contains(branch)
    }

    fn failure(command: &str, stderr: String) -> BackendError {
        BackendError::Failed { command: command.to_string(), code: Some(128), stderr }
    }
}

#[async_trait]
impl WorkspaceBackend for FakeWorkspaceBackend {
    async fn allocate(&self, path: &Path, branch: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.lock();
        inner
            .calls
            .push(BackendCall::Allocate { path: path.to_path_buf(), branch: branch.to_string() });

        if let Some(stderr) = inner.fail_next.take() {
            return Err(Self::failure("git worktree add", stderr));
        }
        if inner.branches.contains(branch) {
            return Err(Self::failure(
                "git worktree add",
                format!("fatal: a branch named '{branch}' already exists"),
            ));
        }
        if inner.worktrees.contains_key(path) {
            return Err(Self::failure(
                "git worktree add",
                format!("fatal: '{}' already exists", path.display()),
            ));
        }

        inner.branches.insert(branch.to_string());
        inner
            .worktrees
            .insert(path.to_path_buf(), FakeWorktree { branch: branch.to_string(), dirty: false });
        Ok(())
    }

    async fn remove_worktree(&self, path: &Path, force: bool) -> Result<(), BackendError> {
        let mut inner = self.inner.lock();
        inner.calls.push(BackendCall::RemoveWorktree { path: path.to_path_buf(), force });

        if let Some(stderr) = inner.fail_next.take() {
            return Err(Self::failure("git worktree remove", stderr));
        }
        if let Some(worktree) = inner.worktrees.get(path) {
            if worktree.dirty && !force {
                return Err(Self::failure(
                    "git worktree remove",
                    format!(
                        "fatal: '{}' contains modified or untracked files, \
                         use --force to delete it",
                        path.display()
                    ),
                ));
            }
        }
        inner.worktrees.remove(path);
        Ok(())
    }

    async fn delete_branch(&self, branch: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.lock();
        inner.calls.push(BackendCall::DeleteBranch { branch: branch.to_string() });

        if let Some(stderr) = inner.fail_branch_delete.take() {
            return Err(Self::failure("git branch delete", stderr));
        }
        inner.branches.remove(branch);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<WorktreeEntry>, BackendError> {
        let mut inner = self.inner.lock();
        inner.calls.push(BackendCall::List);
        Ok(inner
            .worktrees
            .iter()
            .map(|(path, worktree)| WorktreeEntry {
                path: path.clone(),
                branch: Some(worktree.branch.clone()),
                ..Default::default()
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
