// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task identifiers.
//!
//! Every caller-supplied task identifier is normalized before it is used as a
//! table key or folded into a directory or branch name. A `TaskId` can only be
//! constructed through [`TaskId::parse`], so holding one means the value is
//! already in canonical form.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Rejected task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid task id {raw:?}: {reason}")]
pub struct InvalidTaskId {
    pub raw: String,
    pub reason: &'static str,
}

const BLANK: &str = "must contain at least one non-whitespace character";
const SEPARATOR: &str = "must not contain path separators or '..'";

/// Normalized task identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(SmolStr);

impl TaskId {
    /// Normalize `raw` into a task id.
    ///
    /// Trims surrounding whitespace, lower-cases, and collapses each run of
    /// whitespace and underscores into a single `-`. Ids containing `/`, `\`
    /// or `..` are rejected so the derived directory stays directly under
    /// the workspace base directory.
    pub fn parse(raw: &str) -> Result<Self, InvalidTaskId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidTaskId { raw: raw.to_string(), reason: BLANK });
        }
        if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
            return Err(InvalidTaskId { raw: raw.to_string(), reason: SEPARATOR });
        }

        let mut out = String::with_capacity(trimmed.len());
        let mut in_separator = false;
        for ch in trimmed.to_lowercase().chars() {
            if ch.is_whitespace() || ch == '_' {
                if !in_separator {
                    out.push('-');
                    in_separator = true;
                }
            } else {
                out.push(ch);
                in_separator = false;
            }
        }

        Ok(Self(SmolStr::new(out)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = InvalidTaskId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaskId {
    type Error = InvalidTaskId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for TaskId {
    type Error = InvalidTaskId;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0.to_string()
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TaskId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TaskId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
