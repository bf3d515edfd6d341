// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace backend: allocates and reclaims isolated working copies.
//!
//! The backend only touches the version-control tool and the filesystem.
//! Bookkeeping of which workspaces exist belongs to the caller.

mod git;
mod porcelain;

pub use git::GitWorktreeBackend;
pub use porcelain::parse_worktree_list;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::subprocess::BackendError;

/// One working copy as reported by the version-control tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeEntry {
    pub path: PathBuf,
    /// Commit checked out, if reported.
    pub head: Option<String>,
    /// Short branch name (`refs/heads/` stripped), if not detached.
    pub branch: Option<String>,
    pub bare: bool,
    pub detached: bool,
}

/// Adapter for allocating and reclaiming isolated working copies.
#[async_trait]
pub trait WorkspaceBackend: Clone + Send + Sync + 'static {
    /// Create `branch` and a new working copy at `path` checked out on it.
    async fn allocate(&self, path: &Path, branch: &str) -> Result<(), BackendError>;

    /// Remove the working copy at `path`.
    ///
    /// Without `force`, a working copy with uncommitted changes is refused
    /// and nothing is removed. A path the tool no longer knows about counts
    /// as already removed.
    async fn remove_worktree(&self, path: &Path, force: bool) -> Result<(), BackendError>;

    /// Delete `branch`. A branch that no longer exists counts as deleted.
    async fn delete_branch(&self, branch: &str) -> Result<(), BackendError>;

    /// Remove the working copy at `path`, then delete `branch` if given.
    async fn reclaim(
        &self,
        path: &Path,
        branch: Option<&str>,
        force: bool,
    ) -> Result<(), BackendError> {
        self.remove_worktree(path, force).await?;
        if let Some(branch) = branch {
            self.delete_branch(branch).await?;
        }
        Ok(())
    }

    /// All working copies the tool currently knows about.
    async fn list(&self) -> Result<Vec<WorktreeEntry>, BackendError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{BackendCall, FakeWorkspaceBackend};
