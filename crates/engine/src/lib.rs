// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! af-engine: workspace lifecycle management
//!
//! [`WorkspaceManager`] names, allocates, tracks, and reclaims one isolated
//! git worktree per task under a hard concurrency cap. The tracked table is
//! persisted after every mutation so a restarted process picks up where the
//! last one left off.

mod audit;
mod config;
pub mod env;
mod error;
mod workspace;

pub use audit::WorkspaceAudit;
pub use config::{CleanupOptions, ManagerConfig, WorkspaceLayout, STATE_DIR, STATE_FILE};
pub use error::WorkspaceError;
pub use workspace::WorkspaceManager;
