// RIG - rig-error
// Module: RIG Error Codes
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for RIG

// Assertion errors (1000-1099)

/// A recorded check failed
pub const ASSERTION_FAILED: u16 = 1000;
/// Expected and actual values differ
pub const ASSERTION_MISMATCH: u16 = 1001;

// Stub errors (2000-2099)

/// No stub registered under the requested function id
pub const STUB_NOT_REGISTERED: u16 = 2000;
/// A function id was declared twice
pub const STUB_ALREADY_DECLARED: u16 = 2001;
/// A stub configured for error injection was invoked
pub const STUB_INJECTED_FAULT: u16 = 2002;
/// A stub was invoked with arguments it cannot handle
pub const STUB_BAD_ARGUMENTS: u16 = 2003;

// Fixture errors (3000-3099)

/// Fixture kind is not declared
pub const FIXTURE_UNKNOWN_KIND: u16 = 3000;
/// Field override names a field the kind does not declare
pub const FIXTURE_UNKNOWN_FIELD: u16 = 3001;
/// Field override value does not match the declared field type
pub const FIXTURE_FIELD_TYPE_MISMATCH: u16 = 3002;
/// The allocator collaborator refused the allocation
pub const FIXTURE_ALLOCATION_FAILED: u16 = 3003;
/// A chain link points at a freed or out-of-range node
pub const FIXTURE_CHAIN_CORRUPT: u16 = 3004;
/// A chain node was freed twice
pub const FIXTURE_DOUBLE_FREE: u16 = 3005;

// Capture errors (4000-4099)

/// Creating the capture pipe failed
pub const CAPTURE_PIPE_FAILED: u16 = 4000;
/// Duplicating a stream descriptor failed
pub const CAPTURE_DUP_FAILED: u16 = 4001;
/// Restoring the original stream descriptor failed
pub const CAPTURE_RESTORE_FAILED: u16 = 4002;
/// Draining captured bytes failed
pub const CAPTURE_DRAIN_FAILED: u16 = 4003;
/// A capture was started while another capture of the same stream is active
pub const CAPTURE_BUSY: u16 = 4004;

// Process errors (4100-4199)

/// Spawning the child process failed
pub const PROCESS_SPAWN_FAILED: u16 = 4100;
/// Waiting on the child process failed
pub const PROCESS_WAIT_FAILED: u16 = 4101;
/// The child process exceeded its wait deadline
pub const PROCESS_TIMEOUT: u16 = 4102;
/// Child output could not be read
pub const PROCESS_OUTPUT_UNREADABLE: u16 = 4103;

// Runner and configuration errors (5000-5099)

/// A scenario panicked and was converted to a failure
pub const SCENARIO_PANICKED: u16 = 5000;
/// A scenario name was registered twice
pub const DUPLICATE_SCENARIO: u16 = 5001;
/// A registry lock was poisoned
pub const CONCURRENCY_LOCK_FAILURE: u16 = 5002;
/// The scenario registry is full
pub const CAPACITY_LIMIT_EXCEEDED: u16 = 5003;
/// General configuration error
pub const CONFIGURATION_ERROR: u16 = 5004;

// System errors (6000-6099)

/// Underlying I/O error
pub const IO_ERROR: u16 = 6000;
/// Unsupported operation on this platform
pub const UNSUPPORTED: u16 = 6001;
/// Unknown error
pub const UNKNOWN: u16 = 6099;
