// RIG - rig-harness
// Module: Fixture Builder Integration Tests
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixture determinism: null defaults for unset pointer fields, symmetric
//! chain build/free, cycle-safe traversal, and allocation failures surfaced
//! instead of dereferenced.

use rig_error::codes;
use rig_harness::fixture::{ChainArena, FieldKind, FieldValue, FixtureCatalog};
use rig_harness::stub::{StubBehavior, StubRegistry, StubValue};

fn png_info_catalog() -> FixtureCatalog {
    let mut catalog = FixtureCatalog::new();
    catalog
        .declare_kind(
            "png_info",
            vec![
                ("width", FieldKind::Int),
                ("height", FieldKind::Int),
                ("interlaced", FieldKind::Flag),
                ("palette", FieldKind::Link),
                ("trans_alpha", FieldKind::Link),
                ("name", FieldKind::Text),
            ],
        )
        .unwrap();
    catalog
}

#[test]
fn unset_pointer_fields_are_null_never_uninitialized() {
    let catalog = png_info_catalog();
    let fixture = catalog
        .build("png_info", &[("width", FieldValue::Int(16))])
        .unwrap();

    assert_eq!(fixture.get("width"), Some(&FieldValue::Int(16)));
    assert_eq!(fixture.get("height"), Some(&FieldValue::Int(0)));
    assert_eq!(fixture.get("interlaced"), Some(&FieldValue::Flag(false)));
    // Every pointer-shaped field not overridden is the null link.
    assert_eq!(fixture.get("palette"), Some(&FieldValue::Link(None)));
    assert_eq!(fixture.get("trans_alpha"), Some(&FieldValue::Link(None)));
}

#[test]
fn unknown_kind_field_and_type_mismatches_fail_fast() {
    let catalog = png_info_catalog();

    let err = catalog.build("png_struct", &[]).unwrap_err();
    assert_eq!(err.code(), codes::FIXTURE_UNKNOWN_KIND);

    let err = catalog
        .build("png_info", &[("rowbytes", FieldValue::Int(4))])
        .unwrap_err();
    assert_eq!(err.code(), codes::FIXTURE_UNKNOWN_FIELD);

    let err = catalog
        .build("png_info", &[("width", FieldValue::Flag(true))])
        .unwrap_err();
    assert_eq!(err.code(), codes::FIXTURE_FIELD_TYPE_MISMATCH);
}

#[test]
fn chain_round_trip_and_symmetric_free() {
    let mut arena = ChainArena::new();
    let head = arena.build_chain(&[1, 2, 3]);
    assert!(head.is_some());

    assert_eq!(arena.collect_chain(head).unwrap(), vec![1, 2, 3]);
    assert_eq!(arena.live_nodes(), 3);

    let freed = arena.free_chain(head).unwrap();
    assert_eq!(freed, 3);
    assert_eq!(arena.live_nodes(), 0);

    // Rebuilding an empty chain yields a null head.
    assert_eq!(arena.build_chain(&[]), None);
    assert_eq!(arena.collect_chain(None).unwrap(), Vec::<i64>::new());
}

#[test]
fn deliberate_cycle_terminates_traversal_and_free() {
    let mut arena = ChainArena::new();
    let head = arena.build_chain(&[10, 20, 30]);
    let head_index = head.unwrap();
    // Close the loop: 30 -> 10.
    arena.link_next(head_index + 2, Some(head_index)).unwrap();

    let values = arena.collect_chain(head).unwrap();
    assert_eq!(values, vec![10, 20, 30], "cycle must not loop forever");

    let freed = arena.free_chain(head).unwrap();
    assert_eq!(freed, 3);
    assert_eq!(arena.live_nodes(), 0);
}

#[test]
fn freeing_a_dead_head_is_a_double_free() {
    let mut arena = ChainArena::new();
    let head = arena.build_chain(&[5]);
    arena.free_chain(head).unwrap();
    let err = arena.free_chain(head).unwrap_err();
    assert_eq!(err.code(), codes::FIXTURE_DOUBLE_FREE);
}

#[test]
fn null_returning_allocator_is_a_construction_failure() {
    let catalog = png_info_catalog();
    let mut stubs = StubRegistry::new();
    stubs
        .declare("alloc", StubBehavior::FixedReturn(StubValue::Int(0x1000)))
        .unwrap();

    // Healthy allocator: fixture builds and the stub saw one call.
    let fixture = catalog.build_with_allocator(&mut stubs, "png_info", &[]);
    assert!(fixture.is_ok());
    assert_eq!(stubs.call_count("alloc").unwrap(), 1);

    // Injected null: the builder reports failure instead of dereferencing.
    stubs
        .install("alloc", StubBehavior::FixedReturn(StubValue::Null))
        .unwrap();
    let err = catalog
        .build_with_allocator(&mut stubs, "png_info", &[])
        .unwrap_err();
    assert_eq!(err.code(), codes::FIXTURE_ALLOCATION_FAILED);
    assert!(err.is_fixture_error());
}
