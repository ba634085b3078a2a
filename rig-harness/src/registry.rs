// RIG - rig-harness
// Module: RIG Harness Case Registry
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Process-global registry of harness cases.
//!
//! A harness case is one focal routine's whole suite: typically a function
//! that builds a [`ScenarioRunner`](crate::runner::ScenarioRunner), runs it,
//! and reports. Cases self-register at link time through the
//! [`register_case!`](crate::register_case) macro and are executed by the
//! `rig-run` binary (or any caller of [`HarnessRegistry::run_filtered`])
//! with optional name and category filters.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use once_cell::sync::OnceCell;
use rig_error::{kinds, Error, ErrorCategory, Result};

use crate::TestResult;

/// Upper bound on registered cases; registration past this is refused.
const MAX_CASES: usize = 1024;

/// Trait all registered harness cases implement.
pub trait HarnessCase: Send + Sync {
    /// The name of the case (conventionally `focal_routine.scenario_group`).
    fn name(&self) -> &'static str;

    /// The category of the case (e.g. the library the focal routine
    /// belongs to: "zlib", "cjson", "re2").
    fn category(&self) -> &'static str;

    /// Description of the case.
    fn description(&self) -> &'static str {
        "No description provided"
    }

    /// Run the case.
    fn run(&self) -> TestResult;
}

/// Statistics about case execution.
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    /// Number of cases passed.
    pub passed: usize,
    /// Number of cases failed.
    pub failed: usize,
    /// Number of cases skipped by filters.
    pub skipped: usize,
    /// Total execution time in milliseconds.
    pub execution_time_ms: u64,
}

/// The registry that stores all registered harness cases.
pub struct HarnessRegistry {
    cases: Mutex<Vec<Box<dyn HarnessCase>>>,
    count: AtomicUsize,
    stats: Mutex<RunStats>,
}

impl Default for HarnessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HarnessRegistry {
    /// Create a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cases: Mutex::new(Vec::new()),
            count: AtomicUsize::new(0),
            stats: Mutex::new(RunStats::default()),
        }
    }

    /// Get the global registry instance.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceCell<HarnessRegistry> = OnceCell::new();
        REGISTRY.get_or_init(HarnessRegistry::new)
    }

    /// Register a new harness case.
    pub fn register(&self, case: Box<dyn HarnessCase>) -> Result<()> {
        let mut cases = self
            .cases
            .lock()
            .map_err(|_| kinds::poisoned_lock("case registration"))?;

        if cases.len() >= MAX_CASES {
            return Err(Error::new(
                ErrorCategory::Capacity,
                rig_error::codes::CAPACITY_LIMIT_EXCEEDED,
                format!("case registry capacity exceeded: {MAX_CASES}"),
            ));
        }
        if cases.iter().any(|existing| existing.name() == case.name()) {
            return Err(Error::new(
                ErrorCategory::Configuration,
                rig_error::codes::DUPLICATE_SCENARIO,
                format!("case name registered twice: {}", case.name()),
            ));
        }

        cases.push(case);
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Get the number of registered cases.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// Execute a function with all the registered cases.
    /// This avoids the need to clone the cases.
    pub fn with_cases<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&[Box<dyn HarnessCase>]) -> R,
    {
        let cases = self
            .cases
            .lock()
            .map_err(|_| kinds::poisoned_lock("case registry"))?;
        Ok(f(cases.as_slice()))
    }

    /// Run cases matching the given name and category filters.
    ///
    /// Returns the number of cases that were run. Execution is sequential
    /// in registration order; a failing case never stops the rest.
    pub fn run_filtered(
        &self,
        name_filter: Option<&str>,
        category_filter: Option<&str>,
    ) -> Result<usize> {
        let started = std::time::Instant::now();
        let mut run_stats = RunStats::default();
        let mut run_count = 0;

        self.with_cases(|cases| {
            for case in cases {
                let matches = match (name_filter, category_filter) {
                    (Some(name), Some(category)) => {
                        case.name().contains(name) && case.category() == category
                    }
                    (Some(name), None) => case.name().contains(name),
                    (None, Some(category)) => case.category() == category,
                    (None, None) => true,
                };

                if !matches {
                    run_stats.skipped += 1;
                    continue;
                }

                log::debug!("running case: {}", case.name());
                // A panicking case is one failed case, never lost coverage
                // for the cases after it.
                let result = match catch_unwind(AssertUnwindSafe(|| case.run())) {
                    Ok(result) => result,
                    Err(payload) => {
                        let detail = payload
                            .downcast_ref::<&str>()
                            .map(|s| (*s).to_string())
                            .or_else(|| payload.downcast_ref::<String>().cloned())
                            .unwrap_or_else(|| "non-string panic payload".to_string());
                        Err(format!("case panicked: {detail}"))
                    }
                };
                match result {
                    Ok(()) => {
                        run_stats.passed += 1;
                        println!("[OK]  {}", case.name());
                    }
                    Err(e) => {
                        run_stats.failed += 1;
                        println!("[ERR] {}: {e}", case.name());
                    }
                }
                run_count += 1;
            }
        })?;

        #[allow(clippy::cast_possible_truncation)]
        {
            run_stats.execution_time_ms = started.elapsed().as_millis() as u64;
        }
        let mut stats = self
            .stats
            .lock()
            .map_err(|_| kinds::poisoned_lock("case statistics"))?;
        *stats = run_stats;
        Ok(run_count)
    }

    /// Run every registered case.
    pub fn run_all(&self) -> Result<usize> {
        self.run_filtered(None, None)
    }

    /// Get the statistics of the last run.
    pub fn stats(&self) -> Result<RunStats> {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .map_err(|_| kinds::poisoned_lock("case statistics"))
    }

    /// Exit code for the last run: 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.stats() {
            Ok(stats) => i32::from(stats.failed != 0),
            Err(_) => 1,
        }
    }
}

/// Implementation of the [`HarnessCase`] trait for function-backed cases.
pub struct HarnessCaseImpl {
    /// The name of the case.
    pub name: &'static str,
    /// The category of the case.
    pub category: &'static str,
    /// Description of the case.
    pub description: &'static str,
    /// The case function to run.
    pub test_fn: Box<dyn Fn() -> TestResult + Send + Sync>,
}

impl HarnessCase for HarnessCaseImpl {
    fn name(&self) -> &'static str {
        self.name
    }

    fn category(&self) -> &'static str {
        self.category
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn run(&self) -> TestResult {
        (self.test_fn)()
    }
}
