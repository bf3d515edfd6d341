// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file backing for the workspace table.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::backup::rotate_bak_path;
use crate::{StoreError, WorkspaceStore, WorkspaceTable};

/// Stores the table as a pretty-printed JSON object at a fixed path.
///
/// Saves write a sibling temp file and rename it over the target, so readers
/// never observe a partially written table.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkspaceStore for JsonFileStore {
    fn load(&self) -> Result<WorkspaceTable, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(WorkspaceTable::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, table: &WorkspaceTable) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(table)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes())?;
        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            records = table.len(),
            "saved workspace table"
        );
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bak = rotate_bak_path(&self.path);
        fs::rename(&self.path, &bak)?;
        Ok(Some(bak))
    }
}

#[cfg(test)]
#[path = "json_file_tests.rs"]
mod tests;
