// RIG - rig-error
// Module: RIG Error Kind Helpers
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Helper constructors for common RIG errors.
//!
//! These keep call sites short; each helper fixes the category and code and
//! formats a message from the caller's context.

use crate::codes;
use crate::errors::{Error, ErrorCategory};
use crate::prelude::format;

/// No stub has been declared under `function_id`.
#[must_use]
pub fn stub_not_registered(function_id: &str) -> Error {
    Error::new(
        ErrorCategory::Stub,
        codes::STUB_NOT_REGISTERED,
        format!("no stub registered for function id: {function_id}"),
    )
}

/// `function_id` was declared a second time.
#[must_use]
pub fn stub_already_declared(function_id: &str) -> Error {
    Error::new(
        ErrorCategory::Stub,
        codes::STUB_ALREADY_DECLARED,
        format!("function id declared twice: {function_id}"),
    )
}

/// An error-injecting stub fired.
#[must_use]
pub fn stub_injected_fault(function_id: &str, fault_code: u16) -> Error {
    Error::new(
        ErrorCategory::Stub,
        codes::STUB_INJECTED_FAULT,
        format!("injected fault {fault_code} from stub: {function_id}"),
    )
}

/// The fixture kind is not declared.
#[must_use]
pub fn fixture_unknown_kind(kind: &str) -> Error {
    Error::new(
        ErrorCategory::Fixture,
        codes::FIXTURE_UNKNOWN_KIND,
        format!("unknown fixture kind: {kind}"),
    )
}

/// A field override names an undeclared field.
#[must_use]
pub fn fixture_unknown_field(kind: &str, field: &str) -> Error {
    Error::new(
        ErrorCategory::Fixture,
        codes::FIXTURE_UNKNOWN_FIELD,
        format!("fixture kind {kind} has no field: {field}"),
    )
}

/// The allocator collaborator returned null.
#[must_use]
pub fn fixture_allocation_failed(kind: &str) -> Error {
    Error::new(
        ErrorCategory::Fixture,
        codes::FIXTURE_ALLOCATION_FAILED,
        format!("allocator refused allocation for fixture kind: {kind}"),
    )
}

/// A chain operation hit a freed or out-of-range node.
#[must_use]
pub fn fixture_chain_corrupt(index: usize) -> Error {
    Error::new(
        ErrorCategory::Fixture,
        codes::FIXTURE_CHAIN_CORRUPT,
        format!("chain link references invalid node index: {index}"),
    )
}

/// A capture-infrastructure call failed.
#[must_use]
pub fn capture_failure(code: u16, operation: &str) -> Error {
    Error::new(
        ErrorCategory::Capture,
        code,
        format!("capture infrastructure failure during {operation}"),
    )
}

/// The child process exceeded its wait deadline.
#[must_use]
pub fn process_timeout(command: &str) -> Error {
    Error::new(
        ErrorCategory::Process,
        codes::PROCESS_TIMEOUT,
        format!("child process exceeded wait deadline: {command}"),
    )
}

/// Spawning the child process failed.
#[must_use]
pub fn process_spawn_failed(command: &str, detail: &str) -> Error {
    Error::new(
        ErrorCategory::Process,
        codes::PROCESS_SPAWN_FAILED,
        format!("failed to spawn {command}: {detail}"),
    )
}

/// A scenario panicked; the panic payload is carried in the message.
#[must_use]
pub fn scenario_panicked(name: &str, payload: &str) -> Error {
    Error::new(
        ErrorCategory::Runner,
        codes::SCENARIO_PANICKED,
        format!("scenario {name} panicked: {payload}"),
    )
}

/// A registry lock was poisoned.
#[must_use]
pub fn poisoned_lock(what: &str) -> Error {
    Error::new(
        ErrorCategory::Concurrency,
        codes::CONCURRENCY_LOCK_FAILURE,
        format!("failed to acquire lock for {what}"),
    )
}

/// General configuration error.
#[must_use]
pub fn configuration_error(message: &str) -> Error {
    Error::new(
        ErrorCategory::Configuration,
        codes::CONFIGURATION_ERROR,
        format!("configuration error: {message}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_fix_category_and_code() {
        assert_eq!(
            stub_not_registered("alloc").code(),
            codes::STUB_NOT_REGISTERED
        );
        assert!(fixture_allocation_failed("png_info").is_fixture_error());
        assert!(process_timeout("./focal").is_process_error());
        assert!(poisoned_lock("scenario registry").category() == ErrorCategory::Concurrency);
    }
}
