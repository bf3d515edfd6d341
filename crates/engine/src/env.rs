// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the workspace manager.

use std::path::PathBuf;

/// Directory new workspaces are created under (`AF_WORKSPACES_DIR`).
pub fn workspaces_dir() -> Option<PathBuf> {
    std::env::var("AF_WORKSPACES_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Concurrency cap override (`AF_MAX_CONCURRENT`). Zero is ignored.
pub fn max_concurrent() -> Option<usize> {
    std::env::var("AF_MAX_CONCURRENT")
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// State file override (`AF_STATE_FILE`).
pub fn state_file() -> Option<PathBuf> {
    std::env::var("AF_STATE_FILE").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}
