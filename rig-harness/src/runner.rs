// RIG - rig-harness
// Module: RIG Scenario Runner
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Sequential scenario execution against one focal routine.
//!
//! Scenarios run in insertion order, single-threaded, each with a fresh
//! context: its own recorder and chain arena, and a scoped borrow of the
//! suite's stub registry that resets on scope end. A panicking scenario is
//! caught and converted into a failure record so the remaining scenarios
//! still execute; the worst case degrades to "one scenario reports failed",
//! never to lost coverage.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use rig_error::{kinds, Error, Result};

use crate::fixture::{ChainArena, FieldValue, Fixture, FixtureCatalog};
use crate::recorder::Recorder;
use crate::stub::{StubRegistry, StubScope};

/// Everything a scenario function gets to work with.
///
/// The context is created per scenario and discarded after reporting;
/// fixtures and chains built through it are owned by this scenario alone.
#[derive(Debug)]
pub struct ScenarioContext<'a> {
    /// Non-terminating assertion recorder for this scenario.
    pub recorder: Recorder,
    /// Scoped stub registry; resets when the scenario ends.
    pub stubs: StubScope<'a>,
    /// Arena for linked fixtures built by this scenario.
    pub arena: ChainArena,
    catalog: &'a FixtureCatalog,
}

impl ScenarioContext<'_> {
    /// Build a fixture, routing allocation through the `"alloc"` stub when
    /// one is declared.
    pub fn build_fixture(
        &mut self,
        kind: &str,
        overrides: &[(&str, FieldValue)],
    ) -> Result<Fixture> {
        self.catalog
            .build_with_allocator(&mut self.stubs, kind, overrides)
    }
}

type ScenarioFn = Box<dyn Fn(&mut ScenarioContext<'_>) -> Result<()>>;

struct Scenario {
    name: String,
    func: ScenarioFn,
}

/// Outcome of one executed scenario.
#[derive(Debug)]
pub struct ScenarioReport {
    /// Scenario name as registered.
    pub name: String,
    /// Whether the scenario passed.
    pub passed: bool,
    /// Checks recorded by the scenario.
    pub checks_total: usize,
    /// Checks that failed.
    pub checks_failed: usize,
    /// Harness-level error (fixture/capture/stub failure or panic), if any.
    pub error: Option<Error>,
}

/// Aggregated statistics for one run.
#[derive(Debug, Default, Clone)]
pub struct SuiteStats {
    /// Scenarios executed.
    pub total: usize,
    /// Scenarios that failed.
    pub failed: usize,
    /// Checks recorded across all scenarios.
    pub checks_total: usize,
    /// Failed checks across all scenarios.
    pub checks_failed: usize,
    /// Wall-clock execution time in milliseconds.
    pub execution_time_ms: u64,
}

/// Registers and executes scenarios against one focal routine.
pub struct ScenarioRunner {
    scenarios: Vec<Scenario>,
    stubs: StubRegistry,
    catalog: FixtureCatalog,
    reports: Vec<ScenarioReport>,
    stats: SuiteStats,
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioRunner {
    /// Create an empty runner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
            stubs: StubRegistry::new(),
            catalog: FixtureCatalog::new(),
            reports: Vec::new(),
            stats: SuiteStats::default(),
        }
    }

    /// Suite-wide stub registry, for declaring collaborator function ids.
    pub fn stubs_mut(&mut self) -> &mut StubRegistry {
        &mut self.stubs
    }

    /// Suite-wide fixture catalog, for declaring fixture kinds.
    pub fn catalog_mut(&mut self) -> &mut FixtureCatalog {
        &mut self.catalog
    }

    /// Register a named scenario. Execution order is insertion order.
    pub fn add<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&mut ScenarioContext<'_>) -> Result<()> + 'static,
    {
        self.scenarios.push(Scenario {
            name: name.into(),
            func: Box::new(func),
        });
    }

    /// Execute every scenario in order and return the aggregated stats.
    ///
    /// A scenario fails when its function returns an error, when any of its
    /// checks failed, or when it panics; failures never stop the run.
    pub fn run_all(&mut self) -> &SuiteStats {
        self.reports.clear();
        self.stats = SuiteStats::default();
        let started = Instant::now();

        let Self {
            scenarios,
            stubs,
            catalog,
            reports,
            stats,
        } = self;

        for scenario in scenarios.iter() {
            log::debug!("running scenario: {}", scenario.name);
            let mut ctx = ScenarioContext {
                recorder: Recorder::new(),
                stubs: stubs.scope(),
                arena: ChainArena::new(),
                catalog: &*catalog,
            };

            let outcome = catch_unwind(AssertUnwindSafe(|| (scenario.func)(&mut ctx)));

            let report = match outcome {
                Ok(result) => {
                    let error = result.err();
                    ScenarioReport {
                        name: scenario.name.clone(),
                        passed: error.is_none() && ctx.recorder.all_passed(),
                        checks_total: ctx.recorder.total(),
                        checks_failed: ctx.recorder.failed(),
                        error,
                    }
                }
                Err(payload) => {
                    let detail = payload
                        .downcast_ref::<&str>()
                        .map(|s| (*s).to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "non-string panic payload".to_string());
                    ScenarioReport {
                        name: scenario.name.clone(),
                        passed: false,
                        checks_total: ctx.recorder.total(),
                        checks_failed: ctx.recorder.failed(),
                        error: Some(kinds::scenario_panicked(&scenario.name, &detail)),
                    }
                }
            };
            // ctx drops here; the stub scope resets the registry before the
            // next scenario starts.
            drop(ctx);

            if report.passed {
                println!("[PASS] {}", report.name);
            } else if let Some(error) = &report.error {
                println!("[FAIL] {}: {error}", report.name);
            } else {
                println!(
                    "[FAIL] {}: {} of {} checks failed",
                    report.name, report.checks_failed, report.checks_total
                );
            }

            stats.total += 1;
            if !report.passed {
                stats.failed += 1;
            }
            stats.checks_total += report.checks_total;
            stats.checks_failed += report.checks_failed;
            reports.push(report);
        }

        #[allow(clippy::cast_possible_truncation)]
        {
            stats.execution_time_ms = started.elapsed().as_millis() as u64;
        }
        &self.stats
    }

    /// Per-scenario reports from the last run.
    #[must_use]
    pub fn reports(&self) -> &[ScenarioReport] {
        &self.reports
    }

    /// Stats from the last run.
    #[must_use]
    pub fn stats(&self) -> &SuiteStats {
        &self.stats
    }

    /// Print the summary line and return the process exit code.
    ///
    /// The exit contract is uniform across every harness: 0 when all
    /// scenarios passed, 1 otherwise.
    pub fn report(&self) -> i32 {
        println!(
            "Tests run: {}, Failures: {}",
            self.stats.total, self.stats.failed
        );
        i32::from(self.stats.failed != 0)
    }
}
