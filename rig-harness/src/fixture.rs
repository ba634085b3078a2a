// RIG - rig-harness
// Module: RIG Fixture Builder
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Layout-minimal fixtures for focal routines.
//!
//! A fixture kind declares named, typed fields; building a fixture yields
//! zero-initialized defaults for every field not overridden. Pointer-shaped
//! fields (`Link`) default to `None`, never to an uninitialized value, so
//! the focal routine's behavior stays deterministic.
//!
//! Linked structures are modeled as an arena of indexed nodes with explicit
//! next-indices instead of raw pointers: traversal and freeing are
//! bounds-checked and cycle-safe by construction, and deliberate cycles can
//! be built to exercise a routine's cycle-termination behavior.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use rig_error::{kinds, Result};
use tempfile::NamedTempFile;

use crate::stub::{StubRegistry, StubValue};

/// Declared type of a fixture field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed integer, zero default
    Int,
    /// Boolean flag, false default
    Flag,
    /// Byte buffer, empty default
    Bytes,
    /// Text, empty default
    Text,
    /// Pointer-shaped link into a [`ChainArena`], null (`None`) default
    Link,
}

/// Value of a fixture field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Signed integer
    Int(i64),
    /// Boolean flag
    Flag(bool),
    /// Byte buffer
    Bytes(Vec<u8>),
    /// Text
    Text(String),
    /// Link to an arena node; `None` is the null link
    Link(Option<usize>),
}

impl FieldValue {
    /// Zero default for a declared field kind.
    #[must_use]
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Int => Self::Int(0),
            FieldKind::Flag => Self::Flag(false),
            FieldKind::Bytes => Self::Bytes(Vec::new()),
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Link => Self::Link(None),
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            Self::Int(_) => FieldKind::Int,
            Self::Flag(_) => FieldKind::Flag,
            Self::Bytes(_) => FieldKind::Bytes,
            Self::Text(_) => FieldKind::Text,
            Self::Link(_) => FieldKind::Link,
        }
    }
}

/// An owned, built fixture instance.
///
/// Owned exclusively by the scenario that built it; fixtures are not shared
/// across scenarios.
#[derive(Debug, Clone)]
pub struct Fixture {
    kind: &'static str,
    fields: Vec<(&'static str, FieldValue)>,
}

impl Fixture {
    /// The kind this fixture was built from.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Field value by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Mutate a field after building (scenario-local state deltas).
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<()> {
        for (name, slot) in &mut self.fields {
            if *name == field {
                if slot.kind() != value.kind() {
                    return Err(rig_error::Error::new(
                        rig_error::ErrorCategory::Fixture,
                        rig_error::codes::FIXTURE_FIELD_TYPE_MISMATCH,
                        format!("field {field} of kind {:?} given {:?}", slot.kind(), value.kind()),
                    ));
                }
                *slot = value;
                return Ok(());
            }
        }
        Err(kinds::fixture_unknown_field(self.kind, field))
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }
}

/// Catalog of declared fixture kinds.
#[derive(Debug, Default)]
pub struct FixtureCatalog {
    kinds: HashMap<&'static str, Vec<(&'static str, FieldKind)>>,
}

impl FixtureCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a fixture kind with its field layout.
    pub fn declare_kind(
        &mut self,
        kind: &'static str,
        fields: Vec<(&'static str, FieldKind)>,
    ) -> Result<()> {
        if self.kinds.contains_key(kind) {
            return Err(kinds::configuration_error(&format!(
                "fixture kind declared twice: {kind}"
            )));
        }
        self.kinds.insert(kind, fields);
        Ok(())
    }

    /// Build a fixture with zero defaults, overridden per the supplied map.
    ///
    /// Every field not named in `overrides` gets its zero default; a `Link`
    /// field left alone is null, never uninitialized.
    pub fn build(&self, kind: &str, overrides: &[(&str, FieldValue)]) -> Result<Fixture> {
        let Some((kind_name, layout)) = self.kinds.get_key_value(kind) else {
            return Err(kinds::fixture_unknown_kind(kind));
        };

        for (field, value) in overrides {
            match layout.iter().find(|(name, _)| name == field) {
                None => return Err(kinds::fixture_unknown_field(kind, field)),
                Some((_, declared)) if *declared != value.kind() => {
                    return Err(rig_error::Error::new(
                        rig_error::ErrorCategory::Fixture,
                        rig_error::codes::FIXTURE_FIELD_TYPE_MISMATCH,
                        format!(
                            "field {field} of kind {declared:?} given {:?}",
                            value.kind()
                        ),
                    ));
                }
                Some(_) => {}
            }
        }

        let fields = layout
            .iter()
            .map(|(name, field_kind)| {
                let value = overrides
                    .iter()
                    .find(|(override_name, _)| override_name == name)
                    .map_or_else(|| FieldValue::zero(*field_kind), |(_, v)| v.clone());
                (*name, value)
            })
            .collect();

        Ok(Fixture {
            kind: kind_name,
            fields,
        })
    }

    /// Build a fixture, routing the allocation through the `"alloc"`
    /// collaborator when one is declared.
    ///
    /// A null return from the allocator stub is a construction failure; the
    /// builder reports it instead of handing out a fixture that would be
    /// dereferenced as null.
    pub fn build_with_allocator(
        &self,
        stubs: &mut StubRegistry,
        kind: &str,
        overrides: &[(&str, FieldValue)],
    ) -> Result<Fixture> {
        if stubs.is_declared("alloc") {
            let layout_size = self
                .kinds
                .get(kind)
                .map(Vec::len)
                .ok_or_else(|| kinds::fixture_unknown_kind(kind))?;
            let granted = stubs.call("alloc", &[StubValue::Int(layout_size as i64)])?;
            if granted.is_null() {
                return Err(kinds::fixture_allocation_failed(kind));
            }
        }
        self.build(kind, overrides)
    }
}

#[derive(Debug, Clone)]
struct ChainNode {
    value: i64,
    next: Option<usize>,
    live: bool,
}

/// Arena of indexed chain nodes standing in for hand-built linked lists.
#[derive(Debug, Default)]
pub struct ChainArena {
    nodes: Vec<ChainNode>,
}

impl ChainArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node holding `value` with a null next link.
    pub fn alloc_node(&mut self, value: i64) -> usize {
        self.nodes.push(ChainNode {
            value,
            next: None,
            live: true,
        });
        self.nodes.len() - 1
    }

    /// Point `from`'s next link at `to` (or null). Bounds-checked; linking
    /// to an earlier node builds a deliberate cycle.
    pub fn link_next(&mut self, from: usize, to: Option<usize>) -> Result<()> {
        if let Some(target) = to {
            if target >= self.nodes.len() || !self.nodes[target].live {
                return Err(kinds::fixture_chain_corrupt(target));
            }
        }
        match self.nodes.get_mut(from) {
            Some(node) if node.live => {
                node.next = to;
                Ok(())
            }
            _ => Err(kinds::fixture_chain_corrupt(from)),
        }
    }

    /// Value stored at a live node.
    pub fn value(&self, index: usize) -> Result<i64> {
        match self.nodes.get(index) {
            Some(node) if node.live => Ok(node.value),
            _ => Err(kinds::fixture_chain_corrupt(index)),
        }
    }

    /// Build a chain from `values`, returning the head link.
    ///
    /// An empty slice yields a null head. Symmetric with
    /// [`ChainArena::free_chain`].
    pub fn build_chain(&mut self, values: &[i64]) -> Option<usize> {
        let mut head = None;
        let mut tail: Option<usize> = None;
        for &value in values {
            let node = self.alloc_node(value);
            match tail {
                None => head = Some(node),
                Some(prev) => self.nodes[prev].next = Some(node),
            }
            tail = Some(node);
        }
        head
    }

    /// Collect chain values in order, terminating on null, a revisited node
    /// (cycle), or arena exhaustion.
    pub fn collect_chain(&self, head: Option<usize>) -> Result<Vec<i64>> {
        let mut seen = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        let mut cursor = head;
        while let Some(index) = cursor {
            let node = match self.nodes.get(index) {
                Some(node) if node.live => node,
                _ => return Err(kinds::fixture_chain_corrupt(index)),
            };
            if seen[index] {
                break;
            }
            seen[index] = true;
            out.push(node.value);
            cursor = node.next;
        }
        Ok(out)
    }

    /// Free every node reachable from `head`, returning how many were
    /// freed. Cycle-safe; freeing an already-freed node is an error.
    pub fn free_chain(&mut self, head: Option<usize>) -> Result<usize> {
        let mut freed = 0;
        let mut cursor = head;
        while let Some(index) = cursor {
            let node = self
                .nodes
                .get_mut(index)
                .ok_or_else(|| kinds::fixture_chain_corrupt(index))?;
            if !node.live {
                if freed > 0 {
                    // Reached a node already freed in this walk: cycle closed.
                    break;
                }
                return Err(rig_error::Error::new(
                    rig_error::ErrorCategory::Fixture,
                    rig_error::codes::FIXTURE_DOUBLE_FREE,
                    format!("chain node freed twice: {index}"),
                ));
            }
            node.live = false;
            freed += 1;
            cursor = node.next;
        }
        Ok(freed)
    }

    /// Number of live nodes in the arena.
    #[must_use]
    pub fn live_nodes(&self) -> usize {
        self.nodes.iter().filter(|node| node.live).count()
    }
}

/// A scenario-owned temporary file artifact (the `.gz`/PNG pattern of the
/// corpus). The file is deleted when the artifact drops, so cleanup cannot
/// be forgotten at scenario end.
#[derive(Debug)]
pub struct TempArtifact {
    file: NamedTempFile,
}

impl TempArtifact {
    /// Create a temp file seeded with `contents`.
    pub fn with_contents(contents: &[u8]) -> Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents)?;
        file.flush()?;
        Ok(Self { file })
    }

    /// Path of the artifact while it is alive.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_defaults_for_every_field_kind() {
        assert_eq!(FieldValue::zero(FieldKind::Int), FieldValue::Int(0));
        assert_eq!(FieldValue::zero(FieldKind::Link), FieldValue::Link(None));
        assert_eq!(FieldValue::zero(FieldKind::Flag), FieldValue::Flag(false));
    }

    #[test]
    fn temp_artifact_cleans_up_on_drop() {
        let path = {
            let artifact = TempArtifact::with_contents(b"\x1f\x8b\x08\x00").unwrap();
            assert!(artifact.path().exists());
            artifact.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
