// RIG - rig-harness
// Module: Output Capture Integration Tests
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Capture correctness: exact bytes, descriptor restoration, and the
//! subprocess spawn-wait-drain contract including the bounded wait.

#![cfg(unix)]

use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rig_error::codes;
use rig_harness::capture::{
    capture_stderr, capture_stdout, run_captured, CapturedOutput, SpawnSpec,
};

// Descriptor redirection is process-wide state; these tests take the lock so
// the default multi-threaded test harness cannot interleave two captures.
static CAPTURE_LOCK: Mutex<()> = Mutex::new(());

// The test harness intercepts the print macros, so focal closures write to
// the real descriptor the way a linked C routine would.
fn focal_write_stdout(bytes: &[u8]) {
    let mut out = std::io::stdout();
    out.write_all(bytes).unwrap();
    out.flush().unwrap();
}

#[test]
fn capture_yields_exact_bytes_and_restores_stdout() {
    let _guard = CAPTURE_LOCK.lock().unwrap();

    let captured = capture_stdout(|| focal_write_stdout(b"12345")).unwrap();
    assert_eq!(captured.as_bytes(), b"12345");

    // The real descriptor is restored and usable for subsequent writes.
    focal_write_stdout(b"");

    // A second capture starts from a fresh buffer: no carryover.
    let captured = capture_stdout(|| focal_write_stdout(b"67")).unwrap();
    assert_eq!(captured.as_bytes(), b"67");
}

#[test]
fn capture_stderr_is_independent_of_stdout() {
    let _guard = CAPTURE_LOCK.lock().unwrap();

    let captured = capture_stderr(|| {
        let mut err = std::io::stderr();
        err.write_all(b"warning: bad chunk\n").unwrap();
        err.flush().unwrap();
    })
    .unwrap();
    assert!(captured.contains("bad chunk"));

    let silent = capture_stdout(|| {}).unwrap();
    assert!(silent.is_empty());
}

#[test]
fn captured_output_helpers() {
    let captured = CapturedOutput::default();
    assert!(captured.is_empty());
    assert_eq!(captured.as_text(), "");
}

#[test]
fn subprocess_capture_exit_code_and_streams() {
    let spec = SpawnSpec::new("/bin/sh")
        .arg("-c")
        .arg("printf 12345; printf 'oops' >&2; exit 3")
        .timeout(Duration::from_secs(10));
    let capture = run_captured(&spec).unwrap();
    assert_eq!(capture.exit_code, Some(3));
    assert!(!capture.success());
    assert_eq!(capture.stdout, b"12345");
    assert_eq!(capture.stderr, b"oops");
}

#[test]
fn subprocess_reads_stdin_to_completion() {
    let spec = SpawnSpec::new("/bin/cat")
        .stdin(b"fixture payload".to_vec())
        .timeout(Duration::from_secs(10));
    let capture = run_captured(&spec).unwrap();
    assert!(capture.success());
    assert_eq!(capture.stdout_text(), "fixture payload");
}

#[test]
fn wedged_subprocess_hits_the_bounded_wait() {
    let spec = SpawnSpec::new("/bin/sleep")
        .arg("30")
        .timeout(Duration::from_millis(200));
    let err = run_captured(&spec).unwrap_err();
    assert_eq!(err.code(), codes::PROCESS_TIMEOUT);
    assert!(err.is_process_error());
}

#[test]
fn unread_stdin_cannot_stall_past_the_bounded_wait() {
    // A child that neither reads stdin nor exits: the payload is larger
    // than any pipe buffer, so delivery must stay under the same deadline
    // as the wait itself.
    let spec = SpawnSpec::new("/bin/sleep")
        .arg("30")
        .stdin(vec![0u8; 1 << 20])
        .timeout(Duration::from_millis(200));
    let started = Instant::now();
    let err = run_captured(&spec).unwrap_err();
    assert_eq!(err.code(), codes::PROCESS_TIMEOUT);
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "deadline must govern stdin delivery too"
    );
}

#[test]
fn missing_binary_is_a_spawn_failure_not_a_panic() {
    let spec = SpawnSpec::new("/nonexistent/focal-binary");
    let err = run_captured(&spec).unwrap_err();
    assert_eq!(err.code(), codes::PROCESS_SPAWN_FAILED);
}
