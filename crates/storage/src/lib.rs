// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Persistence for the tracked workspace table

mod backup;
mod json_file;
mod memory;
mod table;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use table::WorkspaceTable;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur loading or saving the workspace table
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True when the stored bytes exist but could not be parsed.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Json(_))
    }
}

/// Durable backing for the workspace table.
///
/// The table is loaded once when a manager is constructed and rewritten in
/// full after every mutation.
pub trait WorkspaceStore: Send + Sync {
    /// Load the table. A store with nothing saved yet returns an empty table.
    fn load(&self) -> Result<WorkspaceTable, StoreError>;

    /// Replace the stored table with `table`.
    fn save(&self, table: &WorkspaceTable) -> Result<(), StoreError>;

    /// Move unreadable stored contents aside so the next save starts clean.
    ///
    /// Returns where the old contents were moved, if anywhere.
    fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        Ok(None)
    }
}
