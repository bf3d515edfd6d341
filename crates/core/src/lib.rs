// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! af-core: shared types for the agent factory workspace orchestrator

pub mod macros;

pub mod clock;
pub mod task;
pub mod workspace;

pub use clock::{Clock, FakeClock, SystemClock};
pub use task::{InvalidTaskId, TaskId};
pub use workspace::{
    branch_name, workspace_dir_name, UnknownStatus, WorkspaceRecord, WorkspaceStatus,
    BRANCH_PREFIX, WORKSPACE_DIR_PREFIX,
};
