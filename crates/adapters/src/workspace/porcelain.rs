// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parser for `git worktree list --porcelain`.

use std::path::PathBuf;

use super::WorktreeEntry;
use crate::subprocess::BackendError;

const COMMAND: &str = "git worktree list";

/// Parse porcelain output into entries.
///
/// Records are separated by blank lines and each starts with a
/// `worktree <path>` line. Unknown attribute lines (`locked`, `prunable`,
/// and anything newer git versions add) are ignored.
pub fn parse_worktree_list(output: &str) -> Result<Vec<WorktreeEntry>, BackendError> {
    let mut entries = Vec::new();
    let mut current: Option<WorktreeEntry> = None;

    for line in output.lines() {
        if line.is_empty() {
            entries.extend(current.take());
            continue;
        }

        let (key, value) = line.split_once(' ').unwrap_or((line, ""));
        if key == "worktree" {
            entries.extend(current.take());
            current = Some(WorktreeEntry { path: PathBuf::from(value), ..Default::default() });
            continue;
        }

        let Some(entry) = current.as_mut() else {
            return Err(BackendError::Parse {
                command: COMMAND.to_string(),
                reason: format!("attribute before worktree line: {line:?}"),
            });
        };
        match key {
            "HEAD" => entry.head = Some(value.to_string()),
            "branch" => {
                entry.branch =
                    Some(value.strip_prefix("refs/heads/").unwrap_or(value).to_string());
            }
            "bare" => entry.bare = true,
            "detached" => entry.detached = true,
            _ => {}
        }
    }
    entries.extend(current);

    Ok(entries)
}

#[cfg(test)]
#[path = "porcelain_tests.rs"]
mod tests;
