//! Capacity specs
//!
//! The concurrency cap holds under concurrent callers and frees up as
//! workspaces are reclaimed.

use std::sync::Arc;

use crate::prelude::*;

#[tokio::test]
async fn third_workspace_hits_limit_of_two() {
    let project = Project::git();
    let manager = project.manager(2);

    manager.create_workspace("task-1", "cli").await.unwrap();
    manager.create_workspace("task-2", "cli").await.unwrap();
    assert_eq!(manager.capacity_remaining().await, 0);

    let err = manager.create_workspace("task-3", "cli").await.unwrap_err();
    assert!(matches!(err, WorkspaceError::LimitReached { max: 2 }));
    assert!(!project.work_dir().join("agent-factory-task-3").exists());
    assert!(!project.has_branch("autonomous/task-3"));

    manager.cleanup_workspace("task-1", CleanupOptions::default()).await.unwrap();
    manager.create_workspace("task-3", "cli").await.unwrap();
    assert_eq!(manager.tracked_count().await, 2);
}

#[tokio::test]
async fn terminal_records_still_count_toward_limit() {
    let project = Project::git();
    let manager = project.manager(1);
    manager.create_workspace("task-1", "cli").await.unwrap();
    manager.update_status("task-1", WorkspaceStatus::Merged, None).await.unwrap();

    let err = manager.create_workspace("task-2", "cli").await.unwrap_err();
    assert!(matches!(err, WorkspaceError::LimitReached { max: 1 }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_exceed_limit() {
    let project = Project::git();
    let manager = Arc::new(project.manager(3));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let manager = Arc::clone(&manager);
            tokio::spawn(
                async move { manager.create_workspace(&format!("task-{i}"), "worker").await },
            )
        })
        .collect();

    let mut created = 0;
    let mut limited = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(WorkspaceError::LimitReached { max: 3 }) => limited += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!((created, limited), (3, 3));
    assert_eq!(manager.tracked_count().await, 3);
    assert!(manager.audit().await.unwrap().is_clean());
}

#[tokio::test]
async fn audit_reports_externally_removed_worktree() {
    let project = Project::git();
    let manager = project.manager(5);
    let path = manager.create_workspace("task-1", "cli").await.unwrap();
    manager.create_workspace("task-2", "cli").await.unwrap();

    project.git_stdout(&["worktree", "remove", "--force", &path.to_string_lossy()]);

    let audit = manager.audit().await.unwrap();
    assert_eq!(audit.missing.len(), 1);
    assert_eq!(audit.missing[0], "task-1");
    assert!(audit.untracked.is_empty());
}

#[tokio::test]
async fn audit_reports_untracked_workspace_worktree() {
    let project = Project::git();
    let manager = project.manager(5);
    let stray = project.work_dir().join("agent-factory-stray");

    let stray_path = stray.to_string_lossy();
    project.git_stdout(&["worktree", "add", "-q", "-b", "autonomous/stray", &stray_path, "HEAD"]);

    let audit = manager.audit().await.unwrap();
    assert!(audit.missing.is_empty());
    assert_eq!(audit.untracked.len(), 1);
    assert_eq!(audit.untracked[0].branch.as_deref(), Some("autonomous/stray"));
}
