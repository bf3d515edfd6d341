//! Shared fixtures for specs

use std::path::{Path, PathBuf};
use std::process::Command;

pub use af_core::WorkspaceStatus;
pub use af_engine::{CleanupOptions, ManagerConfig, WorkspaceError, WorkspaceManager};
pub use af_governor::{SafetyGovernor, SafetyLimits};
use tempfile::TempDir;

/// A scratch git repository plus a sibling directory for workspaces.
///
/// Layout: `<tmp>/repo` is the repository, `<tmp>/work` receives worktrees.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Repository with a single commit. Panics if git cannot set one up.
    pub fn git() -> Self {
        init_tracing();
        let project = Self { dir: TempDir::new().unwrap() };
        std::fs::create_dir_all(project.repo()).unwrap();
        std::fs::create_dir_all(project.work_dir()).unwrap();

        project.git_stdout(&["init", "-q"]);
        project.git_stdout(&["config", "user.email", "specs@example.com"]);
        project.git_stdout(&["config", "user.name", "Specs"]);
        project.git_stdout(&["commit", "-q", "--allow-empty", "-m", "init"]);
        project
    }

    pub fn repo(&self) -> PathBuf {
        self.dir.path().join("repo")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn state_path(&self) -> PathBuf {
        self.repo().join(af_engine::STATE_DIR).join(af_engine::STATE_FILE)
    }

    pub fn config(&self, max_concurrent: usize) -> ManagerConfig {
        ManagerConfig::new(self.repo()).base_dir(self.work_dir()).max_concurrent(max_concurrent)
    }

    pub fn manager(&self, max_concurrent: usize) -> GitManager {
        WorkspaceManager::open(self.config(max_concurrent)).unwrap()
    }

    /// Write `contents` to `path` relative to the repository, creating parents.
    pub fn file(&self, path: impl AsRef<Path>, contents: &str) {
        let path = self.repo().join(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// Run git in the repository and return its stdout.
    pub fn git_stdout(&self, args: &[&str]) -> String {
        let output = self
            .git_command(args)
            .output()
            .expect("git must be installed to run workspace specs");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn has_branch(&self, branch: &str) -> bool {
        !self.git_stdout(&["branch", "--list", branch]).trim().is_empty()
    }

    fn git_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(self.repo()).args(args);
        cmd.env_remove("GIT_DIR").env_remove("GIT_WORK_TREE");
        cmd
    }
}

pub type GitManager = WorkspaceManager<af_adapters::GitWorktreeBackend, af_storage::JsonFileStore>;

/// Install a test-writer subscriber once; `RUST_LOG` controls the filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
