// RIG - rig-harness
// Module: Scenario Runner Integration Tests
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! End-to-end runner contract: deterministic order, failures as data, and
//! the 0/1 exit code convention.

use rig_harness::prelude::*;

fn three_scenario_runner() -> ScenarioRunner {
    let mut runner = ScenarioRunner::new();
    runner
        .stubs_mut()
        .declare("alloc", StubBehavior::FixedReturn(StubValue::Int(0x4000)))
        .unwrap();
    runner
        .catalog_mut()
        .declare_kind(
            "gz_header",
            vec![
                ("text", FieldKind::Flag),
                ("time", FieldKind::Int),
                ("extra", FieldKind::Link),
            ],
        )
        .unwrap();

    runner.add("happy_path", |ctx| {
        let header = ctx.build_fixture("gz_header", &[("time", FieldValue::Int(1))])?;
        ctx.recorder.check_eq(
            &Some(&FieldValue::Link(None)),
            &header.get("extra"),
            "extra pointer defaults to null",
        );
        Ok(())
    });
    runner.add("boundary_fails_one_check", |ctx| {
        ctx.recorder.check(true, "precondition holds");
        ctx.recorder
            .check(false, "deliberate boundary mismatch: expected 0, got 1");
        Ok(())
    });
    runner.add("error_injection_still_runs", |ctx| {
        ctx.stubs
            .install("alloc", StubBehavior::FixedReturn(StubValue::Null))?;
        let result = ctx.build_fixture("gz_header", &[]);
        ctx.recorder.check(
            result.is_err(),
            "null allocator must surface a construction failure",
        );
        Ok(())
    });
    runner
}

#[test]
fn failing_scenario_does_not_stop_the_run() {
    let mut runner = three_scenario_runner();
    let stats = runner.run_all().clone();

    assert_eq!(stats.total, 3, "all three scenarios executed");
    assert_eq!(stats.failed, 1);
    assert!(stats.checks_failed >= 1);

    let reports = runner.reports();
    assert!(reports[0].passed);
    assert!(!reports[1].passed);
    assert!(reports[2].passed, "scenario #3 ran after #2 failed");

    assert_eq!(runner.report(), 1, "exit code reflects the failure");
}

#[test]
fn all_passing_run_exits_zero() {
    let mut runner = ScenarioRunner::new();
    runner.add("only", |ctx| {
        ctx.recorder.check_near(3.5, 3.5000001, 1e-3, "tolerant compare");
        Ok(())
    });
    let stats = runner.run_all().clone();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(runner.report(), 0);
}

#[test]
fn harness_error_from_scenario_is_a_failure_record() {
    let mut runner = ScenarioRunner::new();
    runner.add("bad_config", |ctx| {
        // Installing for an undeclared id fails fast; the scenario
        // propagates it with `?` and the runner records it.
        ctx.stubs.install("undeclared", StubBehavior::EchoInput)?;
        Ok(())
    });
    let stats = runner.run_all().clone();
    assert_eq!(stats.failed, 1);
    let report = &runner.reports()[0];
    assert!(report
        .error
        .as_ref()
        .is_some_and(rig_error::Error::is_stub_error));
}

#[cfg(unix)]
#[test]
fn scenario_can_fail_on_captured_output() {
    use std::io::Write;

    let mut runner = ScenarioRunner::new();
    runner.add("emits_wrong_banner", |ctx| {
        let captured = capture_stdout(|| {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"deflate 1.2.11\n");
            let _ = out.flush();
        })?;
        ctx.recorder
            .check_contains(&captured.as_text(), "inflate", "banner names inflate");
        Ok(())
    });
    let stats = runner.run_all().clone();
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.checks_failed, 1);
}
