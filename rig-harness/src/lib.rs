// RIG - rig-harness
// Module: RIG Harness Core
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Micro test-harness toolkit for isolated focal routines
//!
//! This crate provides the five primitives the self-hosted harness pattern
//! is built from:
//!
//! - A non-terminating assertion [`Recorder`](recorder::Recorder): failing
//!   checks are data, never process termination, so every scenario in a run
//!   still executes.
//! - A [`StubRegistry`](stub::StubRegistry) of controllable collaborator
//!   fakes with ordered call logs and a scoped, mandatory reset.
//! - A [`FixtureCatalog`](fixture::FixtureCatalog) for layout-minimal,
//!   zero-initialized fixtures, plus an index-based
//!   [`ChainArena`](fixture::ChainArena) for linked (and deliberately
//!   cyclic) structures.
//! - An output [`capture`] adapter that redirects a standard stream through
//!   a pipe for one invocation, or spawns a whole focal binary and drains
//!   its streams with a bounded wait.
//! - A sequential [`ScenarioRunner`](runner::ScenarioRunner) with the
//!   uniform exit contract: `[PASS]`/`[FAIL]` lines, a
//!   `Tests run: N, Failures: M` summary, and exit code 0/1.
//!
//! A process-global [`HarnessRegistry`](registry::HarnessRegistry) and the
//! [`register_case!`] macro allow harness cases to self-register at link
//! time; the optional `runner` feature adds a CLI binary (`rig-run`) with
//! name/category filtering.
//!
//! Execution is strictly single-threaded and deterministic: scenarios run in
//! insertion order, stubs are reset between scenarios by scope guards, and
//! the only blocking is on pipe reads and child-process completion.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Output capture adapter (unix pipe/dup2 redirection and subprocess capture)
#[cfg(unix)]
pub mod capture;
/// Layout-minimal fixtures and the chain arena
pub mod fixture;
/// Unified import surface
pub mod prelude;
/// Non-terminating assertion recorder
pub mod recorder;
/// Process-global harness case registry
pub mod registry;
/// Sequential scenario runner
pub mod runner;
/// Collaborator stub registry
pub mod stub;

/// CLI entry points for the `rig-run` binary
#[cfg(feature = "runner")]
pub mod cli;

pub use recorder::Recorder;
pub use registry::{HarnessCase, HarnessCaseImpl, HarnessRegistry, RunStats};
pub use runner::{ScenarioContext, ScenarioReport, ScenarioRunner, SuiteStats};
pub use stub::{StubBehavior, StubRegistry, StubScope, StubValue};

/// Result type for harness case functions.
///
/// Mirrors the uniform convention of the corpus: a case either completes
/// (its recorder holds the tally) or reports a harness-level failure string.
pub type TestResult = Result<(), String>;

/// Register a harness case with the global [`registry::HarnessRegistry`].
///
/// The case is registered at link time via a constructor, so any binary that
/// links the defining object file can run it through `rig-run`.
///
/// ```ignore
/// register_case!(
///     name: "inflate_back_null_window",
///     category: "zlib",
///     description: "inflateBack rejects a null window pointer",
///     test_fn: || { /* build a ScenarioRunner, return TestResult */ Ok(()) }
/// );
/// ```
#[macro_export]
macro_rules! register_case {
    (name: $name:expr, category: $category:expr, description: $description:expr, test_fn: $test_fn:expr) => {
        const _: () = {
            #[ctor::ctor]
            fn __register_case() {
                let case = Box::new($crate::HarnessCaseImpl {
                    name: $name,
                    category: $category,
                    description: $description,
                    test_fn: Box::new($test_fn),
                });

                let registry = $crate::HarnessRegistry::global();
                if let Err(e) = registry.register(case) {
                    eprintln!("Failed to register case {}: {}", $name, e);
                }
            }
        };
    };
}
