// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session limits and admission decisions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env;

/// Budgets for one orchestration session. Immutable once a governor is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyLimits {
    /// Spend ceiling in currency units
    pub max_cost: f64,
    /// Wall-clock ceiling in hours
    pub max_time_hours: f64,
    /// Failure streak ceiling
    pub max_consecutive_failures: u32,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self { max_cost: 10.0, max_time_hours: 4.0, max_consecutive_failures: 3 }
    }
}

impl SafetyLimits {
    pub fn new(max_cost: f64, max_time_hours: f64, max_consecutive_failures: u32) -> Self {
        Self { max_cost, max_time_hours, max_consecutive_failures }
    }

    /// Defaults overridden by `AF_MAX_COST`, `AF_MAX_TIME_HOURS` and
    /// `AF_MAX_CONSECUTIVE_FAILURES`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_cost: env::max_cost().unwrap_or(defaults.max_cost),
            max_time_hours: env::max_time_hours().unwrap_or(defaults.max_time_hours),
            max_consecutive_failures: env::max_consecutive_failures()
                .unwrap_or(defaults.max_consecutive_failures),
        }
    }

    af_core::setters! {
        set { max_cost: f64, max_time_hours: f64, max_consecutive_failures: u32 }
    }
}

/// Which budget tripped, with the values that tripped it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitExceeded {
    Cost { total_cost: f64, max_cost: f64 },
    Time { elapsed_hours: f64, max_time_hours: f64 },
    ConsecutiveFailures { count: u32, max: u32 },
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitExceeded::Cost { total_cost, max_cost } => {
                write!(f, "Cost limit exceeded: ${total_cost:.2} >= ${max_cost:.2}")
            }
            LimitExceeded::Time { elapsed_hours, max_time_hours } => {
                write!(f, "Time limit exceeded: {elapsed_hours:.2}h >= {max_time_hours:.2}h")
            }
            LimitExceeded::ConsecutiveFailures { count, max } => {
                write!(f, "Too many consecutive failures: {count} >= {max}")
            }
        }
    }
}

/// Outcome of a limit check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    Allowed,
    Denied(LimitExceeded),
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed)
    }

    /// Human-readable reason; empty when allowed.
    pub fn reason(&self) -> String {
        match self {
            Admission::Allowed => String::new(),
            Admission::Denied(exceeded) => exceeded.to_string(),
        }
    }

    pub fn exceeded(&self) -> Option<&LimitExceeded> {
        match self {
            Admission::Allowed => None,
            Admission::Denied(exceeded) => Some(exceeded),
        }
    }

    /// `(allowed, reason)` pair.
    pub fn into_pair(self) -> (bool, String) {
        (self.is_allowed(), self.reason())
    }
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod tests;
