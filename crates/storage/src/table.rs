// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory workspace table.

use std::collections::BTreeMap;

use af_core::{TaskId, WorkspaceRecord};
use serde::{Deserialize, Deserializer, Serialize};

/// Tracked workspaces keyed by normalized task id.
///
/// Serialized as a JSON object mapping task id to record. On load, entries
/// are re-keyed by each record's own `task_id`, so a hand-edited key can
/// never disagree with the record it points at.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkspaceTable {
    records: BTreeMap<TaskId, WorkspaceRecord>,
}

impl WorkspaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.records.contains_key(task_id)
    }

    pub fn get(&self, task_id: &TaskId) -> Option<&WorkspaceRecord> {
        self.records.get(task_id)
    }

    pub fn get_mut(&mut self, task_id: &TaskId) -> Option<&mut WorkspaceRecord> {
        self.records.get_mut(task_id)
    }

    /// Insert a record, returning any record it replaced.
    pub fn insert(&mut self, record: WorkspaceRecord) -> Option<WorkspaceRecord> {
        self.records.insert(record.task_id.clone(), record)
    }

    pub fn remove(&mut self, task_id: &TaskId) -> Option<WorkspaceRecord> {
        self.records.remove(task_id)
    }

    /// Records in task id order.
    pub fn records(&self) -> impl Iterator<Item = &WorkspaceRecord> {
        self.records.values()
    }
}

impl FromIterator<WorkspaceRecord> for WorkspaceTable {
    fn from_iter<I: IntoIterator<Item = WorkspaceRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

impl<'de> Deserialize<'de> for WorkspaceTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, WorkspaceRecord>::deserialize(deserializer)?;
        Ok(raw.into_values().collect())
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
