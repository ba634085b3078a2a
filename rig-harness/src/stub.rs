// RIG - rig-harness
// Module: RIG Collaborator Stub Registry
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Controllable fakes for the collaborators a focal routine depends on.
//!
//! Function ids must be declared before behaviors can be installed;
//! installing for an unknown id fails fast instead of leaving a stub that is
//! never wired in. Every call appends to an ordered per-id log. Reset is
//! structural, not advisory: [`StubRegistry::scope`] hands out a guard whose
//! `Drop` resets the registry, so sharing one registry across scenarios
//! cannot leak call counts between them.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use rig_error::{kinds, Result};

/// Value exchanged with a stubbed collaborator.
///
/// `Token` stands in for the pointer-identity discrimination the C harnesses
/// use (telling two in-memory "file" contexts apart by address): callers tag
/// a call with a token and compare tokens in the log instead of raw
/// addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubValue {
    /// Null / absent value
    Null,
    /// Integer value
    Int(i64),
    /// Raw byte payload (what the corpus passes as `const char *`)
    Bytes(Vec<u8>),
    /// Text payload
    Text(String),
    /// Opaque identity token
    Token(usize),
}

impl StubValue {
    /// Whether this value is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integer payload, if any.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// Installed behavior of a stub.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// Always return this value.
    FixedReturn(StubValue),
    /// Return the first argument (Null when called without arguments).
    EchoInput,
    /// Fail the call with an injected fault code.
    ErrorInjection(u16),
}

/// One recorded stub call: arguments and the value handed back.
///
/// For error-injecting stubs the recorded return is `Null`; the injected
/// fault surfaces as the call's error, not as a value.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Arguments as passed by the caller.
    pub args: Vec<StubValue>,
    /// Value returned to the caller.
    pub ret: StubValue,
}

#[derive(Debug)]
struct StubEntry {
    default: StubBehavior,
    behavior: StubBehavior,
    log: Vec<Invocation>,
}

/// Registry of fake collaborator functions.
#[derive(Debug, Default)]
pub struct StubRegistry {
    entries: HashMap<&'static str, StubEntry>,
}

impl StubRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a function id with its default behavior.
    ///
    /// Declaring the same id twice is a configuration error.
    pub fn declare(&mut self, function_id: &'static str, default: StubBehavior) -> Result<()> {
        if self.entries.contains_key(function_id) {
            return Err(kinds::stub_already_declared(function_id));
        }
        self.entries.insert(
            function_id,
            StubEntry {
                behavior: default.clone(),
                default,
                log: Vec::new(),
            },
        );
        Ok(())
    }

    /// Install a behavior for a declared function id.
    ///
    /// Installing for an undeclared id fails fast; a silently ignored
    /// install would leave a stub that is never called and give false
    /// confidence.
    pub fn install(&mut self, function_id: &str, behavior: StubBehavior) -> Result<()> {
        match self.entries.get_mut(function_id) {
            Some(entry) => {
                entry.behavior = behavior;
                Ok(())
            }
            None => Err(kinds::stub_not_registered(function_id)),
        }
    }

    /// Whether `function_id` has been declared.
    #[must_use]
    pub fn is_declared(&self, function_id: &str) -> bool {
        self.entries.contains_key(function_id)
    }

    /// Invoke the stub installed under `function_id`.
    pub fn call(&mut self, function_id: &str, args: &[StubValue]) -> Result<StubValue> {
        let entry = self
            .entries
            .get_mut(function_id)
            .ok_or_else(|| kinds::stub_not_registered(function_id))?;

        match entry.behavior.clone() {
            StubBehavior::FixedReturn(value) => {
                entry.log.push(Invocation {
                    args: args.to_vec(),
                    ret: value.clone(),
                });
                Ok(value)
            }
            StubBehavior::EchoInput => {
                let value = args.first().cloned().unwrap_or(StubValue::Null);
                entry.log.push(Invocation {
                    args: args.to_vec(),
                    ret: value.clone(),
                });
                Ok(value)
            }
            StubBehavior::ErrorInjection(fault_code) => {
                entry.log.push(Invocation {
                    args: args.to_vec(),
                    ret: StubValue::Null,
                });
                Err(kinds::stub_injected_fault(function_id, fault_code))
            }
        }
    }

    /// Ordered call log for a declared function id.
    pub fn get_call_log(&self, function_id: &str) -> Result<&[Invocation]> {
        self.entries
            .get(function_id)
            .map(|entry| entry.log.as_slice())
            .ok_or_else(|| kinds::stub_not_registered(function_id))
    }

    /// Number of recorded calls for a declared function id.
    pub fn call_count(&self, function_id: &str) -> Result<usize> {
        self.get_call_log(function_id).map(<[Invocation]>::len)
    }

    /// Clear every call log and reinstall default behaviors. Idempotent.
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.log.clear();
            entry.behavior = entry.default.clone();
        }
    }

    /// Borrow the registry through a guard that resets it on drop.
    ///
    /// This is the mandatory-reset contract: a scenario that shares this
    /// registry with other scenarios takes a scope at entry, and the reset
    /// happens at scope end whether the scenario passed, failed, or
    /// panicked.
    pub fn scope(&mut self) -> StubScope<'_> {
        StubScope { registry: self }
    }
}

/// Scoped borrow of a [`StubRegistry`]; resets the registry when dropped.
#[derive(Debug)]
pub struct StubScope<'a> {
    registry: &'a mut StubRegistry,
}

impl Deref for StubScope<'_> {
    type Target = StubRegistry;

    fn deref(&self) -> &StubRegistry {
        self.registry
    }
}

impl DerefMut for StubScope<'_> {
    fn deref_mut(&mut self) -> &mut StubRegistry {
        self.registry
    }
}

impl Drop for StubScope<'_> {
    fn drop(&mut self) {
        self.registry.reset();
    }
}
