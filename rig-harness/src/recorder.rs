// RIG - rig-harness
// Module: RIG Assertion Recorder
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Non-terminating assertion recorder.
//!
//! A failing check is recorded, never fatal: the total counter always
//! advances, the failure counter and log advance on false conditions, and
//! execution continues so later scenarios still run. The recorder is owned
//! by a scenario context, not a process-wide global; the runner aggregates
//! tallies across scenarios.

use core::fmt::Debug;

/// Accumulates pass/fail counts and failure messages without aborting.
#[derive(Debug, Default)]
pub struct Recorder {
    total: usize,
    failed: usize,
    failures: Vec<String>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a boolean check. Returns the condition so call sites can
    /// early-return out of a scenario after a failed precondition.
    pub fn check(&mut self, condition: bool, message: impl Into<String>) -> bool {
        self.total += 1;
        if !condition {
            self.failed += 1;
            self.failures.push(message.into());
        }
        condition
    }

    /// Record an equality check, formatting both sides into the failure log.
    pub fn check_eq<T: PartialEq + Debug>(
        &mut self,
        expected: &T,
        actual: &T,
        message: impl Into<String>,
    ) -> bool {
        let ok = expected == actual;
        if ok {
            self.total += 1;
        } else {
            let message = message.into();
            self.check(
                false,
                format!("{message}: expected {expected:?}, got {actual:?}"),
            );
        }
        ok
    }

    /// Record an inequality check.
    pub fn check_ne<T: PartialEq + Debug>(
        &mut self,
        unexpected: &T,
        actual: &T,
        message: impl Into<String>,
    ) -> bool {
        let ok = unexpected != actual;
        if ok {
            self.total += 1;
        } else {
            let message = message.into();
            self.check(false, format!("{message}: unexpectedly equal {actual:?}"));
        }
        ok
    }

    /// Record a float comparison within an absolute tolerance.
    pub fn check_near(
        &mut self,
        expected: f64,
        actual: f64,
        tolerance: f64,
        message: impl Into<String>,
    ) -> bool {
        let ok = (expected - actual).abs() <= tolerance;
        if ok {
            self.total += 1;
        } else {
            let message = message.into();
            self.check(
                false,
                format!("{message}: expected {expected} within {tolerance}, got {actual}"),
            );
        }
        ok
    }

    /// Record a substring check against captured or formatted output.
    pub fn check_contains(
        &mut self,
        haystack: &str,
        needle: &str,
        message: impl Into<String>,
    ) -> bool {
        let ok = haystack.contains(needle);
        if ok {
            self.total += 1;
        } else {
            let message = message.into();
            self.check(false, format!("{message}: output does not contain {needle:?}"));
        }
        ok
    }

    /// Number of checks recorded.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Whether every recorded check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// The accumulated failure messages, in record order.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Print the tally and return whether everything passed.
    pub fn summarize(&self) -> bool {
        println!("Tests run: {}, Failures: {}", self.total, self.failed);
        for failure in &self.failures {
            println!("  [ERR] {failure}");
        }
        self.all_passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_checks_only_advance_total() {
        let mut rec = Recorder::new();
        for _ in 0..5 {
            rec.check(true, "never recorded");
        }
        assert_eq!(rec.total(), 5);
        assert_eq!(rec.failed(), 0);
        assert!(rec.all_passed());
        assert!(rec.failures().is_empty());
    }

    #[test]
    fn failing_check_is_data_not_termination() {
        let mut rec = Recorder::new();
        rec.check(false, "first failure");
        rec.check(true, "still runs");
        rec.check_eq(&3, &4, "three is not four");
        assert_eq!(rec.total(), 3);
        assert_eq!(rec.failed(), 2);
        assert!(rec.failures()[1].contains("expected 3"));
    }

    #[test]
    fn near_and_contains_forms() {
        let mut rec = Recorder::new();
        rec.check_near(1.0, 1.0 + 1e-9, 1e-6, "close enough");
        rec.check_near(1.0, 1.5, 1e-6, "far");
        rec.check_contains("PNG width=16 height=8", "width=16", "width echoed");
        rec.check_contains("short", "missing", "absent needle");
        assert_eq!(rec.total(), 4);
        assert_eq!(rec.failed(), 2);
    }
}
