// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for session limits.

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}

/// Session cost ceiling (`AF_MAX_COST`). Negative or non-finite values are ignored.
pub fn max_cost() -> Option<f64> {
    parse_env::<f64>("AF_MAX_COST").filter(|v| v.is_finite() && *v >= 0.0)
}

/// Session wall-clock ceiling in hours (`AF_MAX_TIME_HOURS`).
pub fn max_time_hours() -> Option<f64> {
    parse_env::<f64>("AF_MAX_TIME_HOURS").filter(|v| v.is_finite() && *v >= 0.0)
}

/// Failure streak ceiling (`AF_MAX_CONSECUTIVE_FAILURES`).
pub fn max_consecutive_failures() -> Option<u32> {
    parse_env::<u32>("AF_MAX_CONSECUTIVE_FAILURES")
}
