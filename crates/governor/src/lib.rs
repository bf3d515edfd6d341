// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! af-governor: session budget circuit breaker
//!
//! [`SafetyGovernor`] answers one question for an orchestration loop: may
//! more work start? It tracks accumulated cost, elapsed wall-clock time, and
//! the current failure streak against [`SafetyLimits`]. It performs no I/O
//! and never fails; stopping work is the caller's job.

pub mod env;
mod governor;
mod limits;
mod summary;

pub use governor::SafetyGovernor;
pub use limits::{Admission, LimitExceeded, SafetyLimits};
pub use summary::{LimitsSummary, RemainingBudget, StateSummary};
