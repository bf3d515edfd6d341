// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Circuit breaker over cost, time, and failure streak.

use std::time::Instant;

use af_core::{Clock, SystemClock};
use parking_lot::Mutex;

use crate::limits::{Admission, LimitExceeded, SafetyLimits};
use crate::summary::{LimitsSummary, RemainingBudget, StateSummary};

#[derive(Debug, Default)]
struct Counters {
    total_cost: f64,
    consecutive_failures: u32,
}

/// Session circuit breaker.
///
/// Cost and time limits cannot be cleared within a session. The failure
/// streak is cleared by any recorded success or an explicit reset. All
/// methods take `&self`; share one governor across workers with `Arc`.
pub struct SafetyGovernor<C: Clock = SystemClock> {
    limits: SafetyLimits,
    clock: C,
    start_time: Instant,
    counters: Mutex<Counters>,
}

impl SafetyGovernor<SystemClock> {
    pub fn new(limits: SafetyLimits) -> Self {
        Self::with_clock(limits, SystemClock)
    }
}

impl<C: Clock> SafetyGovernor<C> {
    /// Governor whose session starts at `clock.now()`.
    pub fn with_clock(limits: SafetyLimits, clock: C) -> Self {
        let start_time = clock.now();
        Self { limits, clock, start_time, counters: Mutex::new(Counters::default()) }
    }

    pub fn limits(&self) -> &SafetyLimits {
        &self.limits
    }

    /// Check cost, then time, then failure streak, returning the first limit
    /// that has been reached.
    ///
    /// The order is fixed: when several limits are exceeded at once, cost is
    /// always the one reported.
    pub fn check_limits(&self) -> Admission {
        let counters = self.counters.lock();
        let elapsed_hours = self.elapsed_hours();

        let exceeded = if counters.total_cost >= self.limits.max_cost {
            Some(LimitExceeded::Cost {
                total_cost: counters.total_cost,
                max_cost: self.limits.max_cost,
            })
        } else if elapsed_hours >= self.limits.max_time_hours {
            Some(LimitExceeded::Time { elapsed_hours, max_time_hours: self.limits.max_time_hours })
        } else if counters.consecutive_failures >= self.limits.max_consecutive_failures {
            Some(LimitExceeded::ConsecutiveFailures {
                count: counters.consecutive_failures,
                max: self.limits.max_consecutive_failures,
            })
        } else {
            None
        };

        match exceeded {
            Some(exceeded) => {
                tracing::debug!(reason = %exceeded, "safety limit reached");
                Admission::Denied(exceeded)
            }
            None => Admission::Allowed,
        }
    }

    /// Add `amount` to the session cost. Negative or non-finite amounts are ignored.
    pub fn record_cost(&self, amount: f64) {
        if !valid_cost(amount) {
            return;
        }
        let mut counters = self.counters.lock();
        counters.total_cost += amount;
        tracing::debug!(amount, total_cost = counters.total_cost, "recorded cost");
    }

    /// Clear the failure streak and add `cost` if positive.
    pub fn record_success(&self, cost: f64) {
        let valid = valid_cost(cost);
        let mut counters = self.counters.lock();
        if valid && cost > 0.0 {
            counters.total_cost += cost;
        }
        counters.consecutive_failures = 0;
        tracing::debug!(cost, total_cost = counters.total_cost, "recorded task success");
    }

    pub fn record_failure(&self) {
        let mut counters = self.counters.lock();
        counters.consecutive_failures = counters.consecutive_failures.saturating_add(1);
        tracing::info!(
            consecutive_failures = counters.consecutive_failures,
            max = self.limits.max_consecutive_failures,
            "recorded task failure"
        );
    }

    /// Clear the failure streak without counting a success.
    pub fn reset_consecutive_failures(&self) {
        self.counters.lock().consecutive_failures = 0;
    }

    /// Hours since the governor was built, computed now.
    pub fn elapsed_hours(&self) -> f64 {
        self.clock.hours_since(self.start_time)
    }

    pub fn get_state_summary(&self) -> StateSummary {
        let counters = self.counters.lock();
        StateSummary {
            total_cost: counters.total_cost,
            elapsed_hours: self.elapsed_hours(),
            consecutive_failures: counters.consecutive_failures,
        }
    }

    pub fn get_limits_summary(&self) -> LimitsSummary {
        LimitsSummary {
            max_cost: self.limits.max_cost,
            max_time_hours: self.limits.max_time_hours,
            max_consecutive_failures: self.limits.max_consecutive_failures,
        }
    }

    pub fn get_remaining_budget(&self) -> RemainingBudget {
        let state = self.get_state_summary();
        RemainingBudget {
            remaining_cost: (self.limits.max_cost - state.total_cost).max(0.0),
            remaining_hours: (self.limits.max_time_hours - state.elapsed_hours).max(0.0),
            remaining_failures: self
                .limits
                .max_consecutive_failures
                .saturating_sub(state.consecutive_failures),
        }
    }
}

/// Whether `amount` can be added to the session cost, warning if not.
fn valid_cost(amount: f64) -> bool {
    let valid = amount.is_finite() && amount >= 0.0;
    if !valid {
        tracing::warn!(amount, "ignoring invalid cost amount");
    }
    valid
}

#[cfg(test)]
#[path = "governor_tests.rs"]
mod tests;
