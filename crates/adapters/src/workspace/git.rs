// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Git worktree backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{parse_worktree_list, WorkspaceBackend, WorktreeEntry};
use crate::subprocess::{self, git, BackendError};

/// Creates and removes git worktrees of the repository at `repo_root`.
#[derive(Debug, Clone)]
pub struct GitWorktreeBackend {
    repo_root: PathBuf,
}

impl GitWorktreeBackend {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self { repo_root: repo_root.into() }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Whether git still tracks a worktree at `path`, after pruning entries
    /// whose directories were deleted by hand.
    async fn is_registered(&self, path: &Path) -> Result<bool, BackendError> {
        let mut cmd = git(&self.repo_root);
        cmd.args(["worktree", "prune"]);
        subprocess::run(cmd, "git worktree prune").await?;

        let wanted = comparable_path(path);
        let entries = self.list().await?;
        Ok(entries.iter().any(|e| e.path == path || comparable_path(&e.path) == wanted))
    }

    async fn branch_exists(&self, branch: &str) -> Result<bool, BackendError> {
        let mut cmd = git(&self.repo_root);
        cmd.args(["branch", "--list", branch]);
        let output = subprocess::run(cmd, "git branch list").await?;
        Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
    }
}

/// `path` with symlinks resolved as far as it exists on disk.
fn comparable_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    match (path.parent().and_then(|p| std::fs::canonicalize(p).ok()), path.file_name()) {
        (Some(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

#[async_trait]
impl WorkspaceBackend for GitWorktreeBackend {
    async fn allocate(&self, path: &Path, branch: &str) -> Result<(), BackendError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut cmd = git(&self.repo_root);
        cmd.args(["worktree", "add", "-b", branch]).arg(path).arg("HEAD");
        subprocess::run(cmd, "git worktree add").await?;
        Ok(())
    }

    async fn remove_worktree(&self, path: &Path, force: bool) -> Result<(), BackendError> {
        let mut cmd = git(&self.repo_root);
        cmd.args(["worktree", "remove"]);
        if force {
            cmd.arg("--force");
        }
        cmd.arg(path);

        match subprocess::run(cmd, "git worktree remove").await {
            Ok(_) => Ok(()),
            Err(e @ BackendError::Failed { .. }) => {
                if self.is_registered(path).await? {
                    return Err(e);
                }
                tracing::debug!(path = %path.display(), "worktree already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_branch(&self, branch: &str) -> Result<(), BackendError> {
        let mut cmd = git(&self.repo_root);
        cmd.args(["branch", "-D", branch]);

        match subprocess::run(cmd, "git branch delete").await {
            Ok(_) => Ok(()),
            Err(e @ BackendError::Failed { .. }) => {
                if self.branch_exists(branch).await? {
                    return Err(e);
                }
                tracing::debug!(branch, "branch already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn list(&self) -> Result<Vec<WorktreeEntry>, BackendError> {
        let mut cmd = git(&self.repo_root);
        cmd.args(["worktree", "list", "--porcelain"]);
        let output = subprocess::run(cmd, "git worktree list").await?;
        parse_worktree_list(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
