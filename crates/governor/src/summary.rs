// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only views of governor state for reporting.

use serde::Serialize;

/// Accumulated usage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateSummary {
    pub total_cost: f64,
    pub elapsed_hours: f64,
    pub consecutive_failures: u32,
}

/// Configured ceilings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LimitsSummary {
    pub max_cost: f64,
    pub max_time_hours: f64,
    pub max_consecutive_failures: u32,
}

/// Headroom left before each limit trips. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemainingBudget {
    pub remaining_cost: f64,
    pub remaining_hours: f64,
    pub remaining_failures: u32,
}
