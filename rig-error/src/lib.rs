// RIG - rig-error
// Module: RIG Error Handling
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! RIG error handling library
//!
//! This library provides the error handling system shared by the RIG
//! test-harness crates. It includes the categorized [`Error`] type, numeric
//! error codes, and helper constructors for common harness failures.
//!
//! # Error Categories
//!
//! Errors are organized into categories, each with its own range of error
//! codes:
//!
//! ## Assertion errors (1000-1099)
//! - Recorded check failures surfaced as errors
//!
//! ## Stub errors (2000-2099)
//! - Unregistered or misconfigured collaborator stubs
//! - Injected faults
//!
//! ## Fixture errors (3000-3099)
//! - Unknown kinds or fields
//! - Allocation failures and chain corruption
//!
//! ## Capture and process errors (4000-4199)
//! - Pipe and descriptor failures during stream capture
//! - Subprocess spawn, wait, and timeout failures
//!
//! ## Runner and configuration errors (5000-5099)
//! - Scenario panics, registry capacity, lock poisoning
//!
//! # Usage
//!
//! ```
//! use rig_error::{codes, Error, ErrorCategory};
//!
//! let error = Error::new(
//!     ErrorCategory::Stub,
//!     codes::STUB_NOT_REGISTERED,
//!     "no stub registered for function id: alloc",
//! );
//! assert!(error.is_stub_error());
//!
//! // Using kind helpers for common errors
//! let timeout = rig_error::kinds::process_timeout("sleep 60");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::missing_panics_doc)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Error codes for RIG
pub mod codes;
/// Error types and categories
pub mod errors;
/// Helper constructors for common errors
pub mod kinds;
/// Unified import surface
pub mod prelude;

pub use errors::{Error, ErrorCategory};

/// Result type alias using the RIG [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
