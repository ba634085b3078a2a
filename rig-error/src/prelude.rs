// RIG - rig-error
// Module: RIG Error Prelude
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for rig-error
//!
//! This module provides a unified set of imports for both std and `no_std`
//! builds. It re-exports commonly used types so the rest of the crate (and
//! downstream crates) import from one place.

pub use core::cmp::{Eq, Ord, PartialEq, PartialOrd};
pub use core::fmt;
pub use core::fmt::{Debug, Display};

#[cfg(feature = "std")]
pub use std::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

#[cfg(not(feature = "std"))]
pub use alloc::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

pub use crate::codes;
pub use crate::errors::{Error, ErrorCategory};
pub use crate::kinds;
pub use crate::Result;
