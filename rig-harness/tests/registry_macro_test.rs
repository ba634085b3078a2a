// RIG - rig-harness
// Module: Registry Macro Integration Tests
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Link-time case registration through `register_case!` and execution
//! through the global registry.

use rig_harness::prelude::*;
use rig_harness::register_case;

register_case!(
    name: "deflate_bound.upper_bound_monotonic",
    category: "zlib",
    description: "deflateBound grows with the source length",
    test_fn: || {
        let mut runner = ScenarioRunner::new();
        runner.add("bound_is_monotonic", |ctx| {
            // Stand-in focal arithmetic: the harness contract under test is
            // registration and reporting, not zlib itself.
            let bound = |len: i64| len + (len >> 12) + (len >> 14) + 11;
            ctx.recorder
                .check(bound(100) <= bound(10_000), "bound grows with input");
            Ok(())
        });
        let stats = runner.run_all();
        if stats.failed == 0 {
            Ok(())
        } else {
            Err(format!("{} scenario(s) failed", stats.failed))
        }
    }
);

register_case!(
    name: "deflate_bound.reports_failures",
    category: "zlib",
    description: "a failing scenario is reported, not fatal",
    test_fn: || {
        let mut runner = ScenarioRunner::new();
        runner.add("deliberate_failure", |ctx| {
            ctx.recorder.check(false, "recorded, not fatal");
            Ok(())
        });
        let stats = runner.run_all();
        if stats.failed == 1 {
            Ok(())
        } else {
            Err("expected exactly one failed scenario".to_string())
        }
    }
);

register_case!(
    name: "inflate_sync.panics_on_null_state",
    category: "zlib-abort",
    description: "a panicking case is a failed case, never a lost run",
    test_fn: || panic!("null state dereference")
);

// Single test: the global registry's run statistics are shared state, and
// concurrent run_filtered calls would interleave.
#[test]
fn registered_cases_are_visible_and_filterable() {
    let registry = HarnessRegistry::global();
    assert!(registry.count() >= 2, "ctor registration ran at link time");

    let run = registry
        .run_filtered(Some("deflate_bound"), Some("zlib"))
        .unwrap();
    assert_eq!(run, 2);

    let stats = registry.stats().unwrap();
    assert_eq!(stats.passed, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(registry.exit_code(), 0);

    // A tighter name filter narrows execution to the one matching case.
    let run = registry
        .run_filtered(Some("upper_bound_monotonic"), None)
        .unwrap();
    assert_eq!(run, 1);

    // The panicking case is recorded as a failure and the run survives.
    let run = registry.run_filtered(None, Some("zlib-abort")).unwrap();
    assert_eq!(run, 1);
    let stats = registry.stats().unwrap();
    assert_eq!(stats.failed, 1);
    assert_eq!(registry.exit_code(), 1);
}
