// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O (the git binary)

pub mod subprocess;
pub mod workspace;

pub use subprocess::BackendError;
pub use workspace::{GitWorktreeBackend, WorkspaceBackend, WorktreeEntry};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use workspace::{BackendCall, FakeWorkspaceBackend};
