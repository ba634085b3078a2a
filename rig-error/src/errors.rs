// RIG - rig-error
// Module: RIG Error Types
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Unified error handling for RIG
//!
//! This module provides the categorized error type used across the RIG
//! harness crates. Errors carry a category, a numeric code, and a message.

use core::fmt;

use crate::codes;
use crate::prelude::String;

/// `Error` categories for RIG operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Assertion recorder errors
    Assertion = 1,
    /// Collaborator stub errors
    Stub = 2,
    /// Fixture construction errors
    Fixture = 3,
    /// Stream capture errors
    Capture = 4,
    /// Subprocess errors
    Process = 5,
    /// Scenario runner errors
    Runner = 6,
    /// Configuration errors
    Configuration = 7,
    /// Capacity errors
    Capacity = 8,
    /// Concurrency errors (lock poisoning)
    Concurrency = 9,
    /// I/O errors
    Io = 10,
    /// System errors
    System = 11,
    /// Unknown errors
    Unknown = 12,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Assertion => "assertion",
            Self::Stub => "stub",
            Self::Fixture => "fixture",
            Self::Capture => "capture",
            Self::Process => "process",
            Self::Runner => "runner",
            Self::Configuration => "configuration",
            Self::Capacity => "capacity",
            Self::Concurrency => "concurrency",
            Self::Io => "io",
            Self::System => "system",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// RIG `Error` type
///
/// The main error type for the RIG harness. It provides categorized errors
/// with numeric codes and messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code: u16,
    message: String,
}

impl Error {
    /// Create a new error.
    #[must_use]
    pub fn new(category: ErrorCategory, code: u16, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is an assertion error
    #[must_use]
    pub fn is_assertion_error(&self) -> bool {
        self.category == ErrorCategory::Assertion
    }

    /// Check if this is a stub error
    #[must_use]
    pub fn is_stub_error(&self) -> bool {
        self.category == ErrorCategory::Stub
    }

    /// Check if this is a fixture error
    #[must_use]
    pub fn is_fixture_error(&self) -> bool {
        self.category == ErrorCategory::Fixture
    }

    /// Check if this is a capture error
    #[must_use]
    pub fn is_capture_error(&self) -> bool {
        self.category == ErrorCategory::Capture
    }

    /// Check if this is a process error
    #[must_use]
    pub fn is_process_error(&self) -> bool {
        self.category == ErrorCategory::Process
    }

    /// Check if this is a configuration error
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        self.category == ErrorCategory::Configuration
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}] {}", self.category, self.code, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorCategory::Io, codes::IO_ERROR, err.to_string())
    }
}
