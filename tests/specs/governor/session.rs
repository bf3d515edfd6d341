//! Governor session specs
//!
//! One governor is shared by every worker in a session; its limits come from
//! the environment and its summaries are reported as JSON.

use std::sync::Arc;

use serial_test::serial;

use crate::prelude::*;

fn clear_env() {
    std::env::remove_var("AF_MAX_COST");
    std::env::remove_var("AF_MAX_TIME_HOURS");
    std::env::remove_var("AF_MAX_CONSECUTIVE_FAILURES");
}

#[test]
#[serial]
fn limits_come_from_environment() {
    clear_env();
    std::env::set_var("AF_MAX_COST", "2");
    std::env::set_var("AF_MAX_CONSECUTIVE_FAILURES", "1");

    let governor = SafetyGovernor::new(SafetyLimits::from_env());
    clear_env();

    let limits = governor.get_limits_summary();
    assert_eq!(limits.max_cost, 2.0);
    assert_eq!(limits.max_time_hours, 4.0);
    assert_eq!(limits.max_consecutive_failures, 1);

    governor.record_failure();
    let (allowed, reason) = governor.check_limits().into_pair();
    assert!(!allowed);
    assert_eq!(reason, "Too many consecutive failures: 1 >= 1");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn workers_share_one_budget() {
    let governor = Arc::new(SafetyGovernor::new(SafetyLimits::new(5.0, 4.0, 3)));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let governor = Arc::clone(&governor);
            tokio::spawn(async move { governor.record_success(0.5) })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let admission = governor.check_limits();
    assert!(!admission.is_allowed());
    assert!(admission.reason().starts_with("Cost limit exceeded"));
    assert_eq!(governor.get_remaining_budget().remaining_cost, 0.0);
}

#[test]
fn summaries_report_as_json() {
    let governor = SafetyGovernor::new(SafetyLimits::default());
    governor.record_cost(1.25);
    governor.record_failure();

    let state = serde_json::to_value(governor.get_state_summary()).unwrap();
    assert_eq!(state["total_cost"], 1.25);
    assert_eq!(state["consecutive_failures"], 1);
    assert!(state["elapsed_hours"].as_f64().unwrap() < 1.0);

    let limits = serde_json::to_value(governor.get_limits_summary()).unwrap();
    assert_eq!(limits, serde_json::json!({
        "max_cost": 10.0,
        "max_time_hours": 4.0,
        "max_consecutive_failures": 3,
    }));

    let remaining = serde_json::to_value(governor.get_remaining_budget()).unwrap();
    assert_eq!(remaining["remaining_cost"], 8.75);
    assert_eq!(remaining["remaining_failures"], 2);
}
