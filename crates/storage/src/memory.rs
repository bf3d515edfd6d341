// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory backing for the workspace table.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{StoreError, WorkspaceStore, WorkspaceTable};

#[derive(Debug, Default)]
struct Inner {
    contents: Option<String>,
    saves: usize,
    fail_saves: bool,
}

/// Keeps the serialized table in memory.
///
/// Clones share the same contents, so a second manager built from a clone
/// observes what the first one saved. Contents round-trip through JSON
/// exactly as the file store's do.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw serialized contents (which may be malformed).
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.lock().contents = Some(contents.into());
        store
    }

    /// Raw serialized contents, if anything has been saved.
    pub fn contents(&self) -> Option<String> {
        self.inner.lock().contents.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.lock().saves
    }

    /// Make subsequent saves fail with an IO error.
    pub fn fail_saves(&self, fail: bool) {
        self.inner.lock().fail_saves = fail;
    }
}

impl WorkspaceStore for MemoryStore {
    fn load(&self) -> Result<WorkspaceTable, StoreError> {
        match self.inner.lock().contents.as_deref() {
            Some(contents) => Ok(serde_json::from_str(contents)?),
            None => Ok(WorkspaceTable::new()),
        }
    }

    fn save(&self, table: &WorkspaceTable) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.fail_saves {
            return Err(std::io::Error::other("injected save failure").into());
        }
        inner.contents = Some(serde_json::to_string(table)?);
        inner.saves += 1;
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<std::path::PathBuf>, StoreError> {
        self.inner.lock().contents = None;
        Ok(None)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
