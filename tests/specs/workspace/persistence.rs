//! Persistence specs
//!
//! The tracked table survives a restart and an unreadable state file never
//! prevents the manager from starting.

use crate::prelude::*;

#[tokio::test]
async fn restart_reloads_tracked_workspaces() {
    let project = Project::git();
    {
        let manager = project.manager(5);
        manager.create_workspace("task-1", "planner").await.unwrap();
        manager.create_workspace("task-2", "planner").await.unwrap();
        manager.update_status("task-2", WorkspaceStatus::Failed, None).await.unwrap();
    }

    let manager = project.manager(5);
    let ids: Vec<String> =
        manager.list_workspaces().await.into_iter().map(|r| r.task_id.to_string()).collect();
    assert_eq!(ids, vec!["task-1", "task-2"]);
    assert_eq!(manager.get_workspace("task-2").await.unwrap().status, WorkspaceStatus::Failed);

    // Restored records are still reclaimable
    assert!(manager.cleanup_workspace("task-1", CleanupOptions::default()).await.unwrap());
    assert!(!project.has_branch("autonomous/task-1"));
}

#[tokio::test]
async fn state_file_is_keyed_by_task_id() {
    let project = Project::git();
    let manager = project.manager(5);
    manager.create_workspace("Task One", "planner").await.unwrap();

    let raw = std::fs::read_to_string(project.state_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &json["task-one"];
    assert_eq!(record["task_id"], "task-one");
    assert_eq!(record["branch_name"], "autonomous/task-one");
    assert_eq!(record["status"], "active");
    assert_eq!(record["creator"], "planner");
    assert!(record["created_at"].as_str().is_some_and(|s| s.contains('T')));
    assert!(record.get("pr_url").is_none());
}

#[tokio::test]
async fn corrupt_state_file_starts_empty() {
    let project = Project::git();
    project.file(".agent-factory/worktrees.json", "{ this is not json");

    let manager = project.manager(5);
    assert!(manager.list_workspaces().await.is_empty());
    assert!(project.state_path().with_extension("bak").exists());

    manager.create_workspace("task-1", "cli").await.unwrap();
    let raw = std::fs::read_to_string(project.state_path()).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

#[tokio::test]
async fn empty_state_file_is_treated_as_unreadable() {
    let project = Project::git();
    project.file(".agent-factory/worktrees.json", "");

    let manager = project.manager(5);
    assert_eq!(manager.tracked_count().await, 0);
}
