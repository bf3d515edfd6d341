//! Workspace lifecycle specs
//!
//! Verify that workspaces are real git worktrees on their own branch and that
//! cleanup removes them, refusing dirty ones unless forced.

use crate::prelude::*;

#[tokio::test]
async fn creates_worktree_on_dedicated_branch() {
    let project = Project::git();
    let manager = project.manager(5);

    let path = manager.create_workspace("Task 1", "planner").await.unwrap();

    assert_eq!(path, project.work_dir().join("agent-factory-task-1"));
    assert!(path.join(".git").is_file(), "worktree checkout should exist at {}", path.display());
    assert!(project.has_branch("autonomous/task-1"));

    let record = manager.get_workspace("task-1").await.unwrap();
    assert_eq!(record.status, WorkspaceStatus::Active);
    assert_eq!(record.branch_name, "autonomous/task-1");
    assert_eq!(record.creator, "planner");

    let porcelain = project.git_stdout(&["worktree", "list", "--porcelain"]);
    assert!(porcelain.contains("branch refs/heads/autonomous/task-1"));
    assert!(manager.audit().await.unwrap().is_clean());
}

#[tokio::test]
async fn cleanup_removes_worktree_and_branch() {
    let project = Project::git();
    let manager = project.manager(5);
    let path = manager.create_workspace("task-2", "cli").await.unwrap();

    let removed = manager.cleanup_workspace("task-2", CleanupOptions::default()).await.unwrap();

    assert!(removed);
    assert!(!path.exists());
    assert!(!project.has_branch("autonomous/task-2"));
    assert!(manager.get_workspace("task-2").await.is_none());
    assert!(manager.list_workspaces().await.is_empty());
}

#[tokio::test]
async fn cleanup_can_keep_branch() {
    let project = Project::git();
    let manager = project.manager(5);
    let path = manager.create_workspace("task-3", "cli").await.unwrap();

    manager
        .cleanup_workspace("task-3", CleanupOptions::default().delete_branch(false))
        .await
        .unwrap();

    assert!(!path.exists());
    assert!(project.has_branch("autonomous/task-3"));
}

#[tokio::test]
async fn dirty_workspace_needs_force() {
    let project = Project::git();
    let manager = project.manager(5);
    let path = manager.create_workspace("task-4", "cli").await.unwrap();
    std::fs::write(path.join("scratch.txt"), "uncommitted work").unwrap();

    let err = manager.cleanup_workspace("task-4", CleanupOptions::default()).await.unwrap_err();
    assert!(matches!(err, WorkspaceError::ToolFailure(_)), "unexpected error: {err}");
    assert!(path.exists());
    assert!(manager.get_workspace("task-4").await.is_some());

    let removed =
        manager.cleanup_workspace("task-4", CleanupOptions::default().force(true)).await.unwrap();
    assert!(removed);
    assert!(!path.exists());
    assert!(manager.get_workspace("task-4").await.is_none());
}

#[tokio::test]
async fn duplicate_and_unknown_ids_are_rejected() {
    let project = Project::git();
    let manager = project.manager(5);
    manager.create_workspace("task-5", "a").await.unwrap();

    let err = manager.create_workspace("TASK_5", "b").await.unwrap_err();
    assert!(matches!(err, WorkspaceError::AlreadyExists(_)));

    let err =
        manager.cleanup_workspace("never-created", CleanupOptions::default()).await.unwrap_err();
    assert!(matches!(err, WorkspaceError::NotFound(_)));

    let err = manager.create_workspace("   ", "a").await.unwrap_err();
    assert!(matches!(err, WorkspaceError::InvalidTaskId(_)));
}

#[tokio::test]
async fn status_updates_record_review_url() {
    let project = Project::git();
    let manager = project.manager(5);
    manager.create_workspace("task-6", "cli").await.unwrap();

    manager
        .update_status("task-6", WorkspaceStatus::Merged, Some("https://example.com/pr/6"))
        .await
        .unwrap();

    let record = manager.get_workspace("task-6").await.unwrap();
    assert_eq!(record.status, WorkspaceStatus::Merged);
    assert_eq!(record.pr_url.as_deref(), Some("https://example.com/pr/6"));

    let err = manager.update_status("task-6", WorkspaceStatus::Active, None).await.unwrap_err();
    assert!(matches!(err, WorkspaceError::InvalidTransition { .. }));
}

#[tokio::test]
async fn worktree_removed_by_hand_is_still_reclaimed() {
    let project = Project::git();
    let manager = project.manager(1);
    let path = manager.create_workspace("task-7", "cli").await.unwrap();

    project.git_stdout(&["worktree", "remove", "--force", &path.to_string_lossy()]);
    assert!(!manager.audit().await.unwrap().is_clean());

    let forced = CleanupOptions::default().force(true);
    assert!(manager.cleanup_workspace("task-7", forced).await.unwrap());
    assert!(!project.has_branch("autonomous/task-7"));
    assert_eq!(manager.tracked_count().await, 0);

    manager.create_workspace("task-8", "cli").await.unwrap();
}

#[tokio::test]
async fn deleted_directory_and_branch_are_reclaimed() {
    let project = Project::git();
    let manager = project.manager(1);
    let path = manager.create_workspace("task-9", "cli").await.unwrap();

    std::fs::remove_dir_all(&path).unwrap();
    project.git_stdout(&["update-ref", "-d", "refs/heads/autonomous/task-9"]);

    let forced = CleanupOptions::default().force(true);
    assert!(manager.cleanup_workspace("task-9", forced).await.unwrap());
    assert_eq!(manager.tracked_count().await, 0);
    assert!(manager.audit().await.unwrap().is_clean());
}
