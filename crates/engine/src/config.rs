// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manager configuration.

use std::path::{Path, PathBuf};

use crate::env;

/// Tooling directory inside the managed repository.
pub const STATE_DIR: &str = ".agent-factory";

/// Name of the persisted workspace table inside [`STATE_DIR`].
pub const STATE_FILE: &str = "worktrees.json";

/// Workspace manager configuration
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Repository the worktrees are created from
    pub repo_root: PathBuf,
    /// Parent directory of workspaces (default: the repository's parent)
    pub base_dir: Option<PathBuf>,
    /// Persisted table location (default: `<repo_root>/.agent-factory/worktrees.json`)
    pub state_path: Option<PathBuf>,
    /// Maximum number of tracked workspaces
    pub max_concurrent: usize,
}

impl ManagerConfig {
    pub const DEFAULT_MAX_CONCURRENT: usize = 5;

    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            base_dir: None,
            state_path: None,
            max_concurrent: Self::DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Defaults overridden by `AF_WORKSPACES_DIR`, `AF_STATE_FILE` and
    /// `AF_MAX_CONCURRENT`.
    pub fn from_env(repo_root: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(repo_root);
        config.base_dir = env::workspaces_dir();
        config.state_path = env::state_file();
        if let Some(max) = env::max_concurrent() {
            config.max_concurrent = max;
        }
        config
    }

    af_core::setters! {
        set { max_concurrent: usize }
        option { base_dir: PathBuf, state_path: PathBuf }
    }

    /// Resolve defaults into absolute paths.
    pub fn layout(&self) -> std::io::Result<WorkspaceLayout> {
        let repo_root = std::path::absolute(&self.repo_root)?;
        let base_dir = match &self.base_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => repo_root.parent().map(Path::to_path_buf).unwrap_or_else(|| repo_root.clone()),
        };
        let state_path = match &self.state_path {
            Some(path) => std::path::absolute(path)?,
            None => repo_root.join(STATE_DIR).join(STATE_FILE),
        };
        Ok(WorkspaceLayout { repo_root, base_dir, state_path })
    }
}

/// Absolute locations a manager works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    pub repo_root: PathBuf,
    pub base_dir: PathBuf,
    pub state_path: PathBuf,
}

/// Options for reclaiming a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Remove the worktree even with uncommitted changes
    pub force: bool,
    /// Delete the workspace branch after removing the worktree
    pub delete_branch: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self { force: false, delete_branch: true }
    }
}

impl CleanupOptions {
    af_core::setters! {
        set { force: bool, delete_branch: bool }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
