// RIG - rig-harness
// Module: RIG Harness Prelude
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for rig-harness
//!
//! Re-exports the types a harness file needs, so a single
//! `use rig_harness::prelude::*;` is enough to write scenarios.

pub use rig_error::{codes, kinds, Error, ErrorCategory, Result};

pub use crate::fixture::{
    ChainArena, FieldKind, FieldValue, Fixture, FixtureCatalog, TempArtifact,
};
pub use crate::recorder::Recorder;
pub use crate::registry::{HarnessCase, HarnessCaseImpl, HarnessRegistry, RunStats};
pub use crate::runner::{ScenarioContext, ScenarioReport, ScenarioRunner, SuiteStats};
pub use crate::stub::{Invocation, StubBehavior, StubRegistry, StubScope, StubValue};
pub use crate::TestResult;

#[cfg(unix)]
pub use crate::capture::{
    capture_stderr, capture_stdout, capture_stream, run_captured, CaptureStream, CapturedOutput,
    ProcessCapture, SpawnSpec,
};
