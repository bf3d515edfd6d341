// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable elapsed-time accounting

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

const SECS_PER_HOUR: f64 = 3600.0;

/// A monotonic clock
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Instant;

    /// Hours elapsed since `start`, saturating at zero.
    fn hours_since(&self, start: Instant) -> f64 {
        self.now().saturating_duration_since(start).as_secs_f64() / SECS_PER_HOUR
    }
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self { current: Arc::new(Mutex::new(Instant::now())) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.current.lock() += duration;
    }

    /// Advance the clock by a (possibly fractional) number of hours
    pub fn advance_hours(&self, hours: f64) {
        self.advance(Duration::from_secs_f64(hours.max(0.0) * SECS_PER_HOUR));
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
