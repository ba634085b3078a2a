// RIG - rig-harness
// Module: RIG Output Capture Adapter
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Output capture for routines that report through process streams.
//!
//! In-process capture walks the Idle → Redirecting → Draining → Idle state
//! machine over `pipe`/`dup`/`dup2`: the original descriptor is saved, the
//! stream is pointed at a pipe for exactly one invocation, then restored,
//! and the pipe is drained to end-of-stream. Restoration is held by an RAII
//! guard so a panicking focal routine cannot leave the real stream
//! redirected.
//!
//! Whole-program focal targets use the subprocess variant: spawn with piped
//! streams, wait with a bounded deadline, and treat exit code plus captured
//! bytes as the observable contract.
//!
//! Any infrastructure failure here aborts only the current scenario; callers
//! record it through the assertion recorder and the run continues.

use std::io::{Read, Write};
use std::os::unix::io::RawFd;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use rig_error::{codes, kinds, Result};

/// Which standard stream a capture redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStream {
    /// Standard output (fd 1)
    Stdout,
    /// Standard error (fd 2)
    Stderr,
}

impl CaptureStream {
    fn fd(self) -> RawFd {
        match self {
            Self::Stdout => libc::STDOUT_FILENO,
            Self::Stderr => libc::STDERR_FILENO,
        }
    }

    fn flush(self) {
        match self {
            Self::Stdout => {
                let _ = std::io::stdout().flush();
            }
            Self::Stderr => {
                let _ = std::io::stderr().flush();
            }
        }
    }
}

/// Bytes captured from one focal-routine invocation.
///
/// A fresh buffer is produced per capture and the pipe is drained to EOF
/// before it is returned, so carryover between captures is impossible.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    bytes: Vec<u8>,
}

impl CapturedOutput {
    /// Captured bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Captured bytes as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Whether the captured text contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.as_text().contains(needle)
    }

    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Closes a raw descriptor on drop.
#[derive(Debug)]
struct OwnedFd(RawFd);

impl OwnedFd {
    fn raw(&self) -> RawFd {
        self.0
    }
}

impl Drop for OwnedFd {
    fn drop(&mut self) {
        if self.0 >= 0 {
            // SAFETY: fd was obtained from pipe/dup and is owned here.
            unsafe {
                libc::close(self.0);
            }
            self.0 = -1;
        }
    }
}

/// Restores the redirected stream descriptor on drop.
#[derive(Debug)]
struct RedirectGuard {
    stream: CaptureStream,
    saved: OwnedFd,
    restored: bool,
}

impl RedirectGuard {
    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.stream.flush();
        // SAFETY: saved is a valid descriptor duplicated from the stream fd.
        let rc = unsafe { libc::dup2(self.saved.raw(), self.stream.fd()) };
        self.restored = true;
        if rc < 0 {
            return Err(kinds::capture_failure(codes::CAPTURE_RESTORE_FAILED, "dup2"));
        }
        Ok(())
    }
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        if !self.restored {
            log::warn!(
                "restoring {:?} from panic path during capture",
                self.stream
            );
            let _ = self.restore();
        }
    }
}

fn make_pipe() -> Result<(OwnedFd, OwnedFd)> {
    let mut fds = [0 as RawFd; 2];
    // SAFETY: fds points at a writable array of two descriptors.
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        return Err(kinds::capture_failure(codes::CAPTURE_PIPE_FAILED, "pipe"));
    }
    Ok((OwnedFd(fds[0]), OwnedFd(fds[1])))
}

/// Capture everything `focal` writes to `stream`.
///
/// The routine is invoked exactly once. The real descriptor is restored
/// before the captured bytes are returned, and it remains usable for
/// subsequent writes by the test process.
pub fn capture_stream<F>(stream: CaptureStream, focal: F) -> Result<CapturedOutput>
where
    F: FnOnce(),
{
    // Idle -> Redirecting
    let (read_end, write_end) = make_pipe()?;
    stream.flush();

    // SAFETY: the stream fd is a valid open descriptor for this process.
    let saved = unsafe { libc::dup(stream.fd()) };
    if saved < 0 {
        return Err(kinds::capture_failure(codes::CAPTURE_DUP_FAILED, "dup"));
    }
    let mut guard = RedirectGuard {
        stream,
        saved: OwnedFd(saved),
        restored: false,
    };

    // SAFETY: write_end is a valid pipe descriptor owned above.
    if unsafe { libc::dup2(write_end.raw(), stream.fd()) } < 0 {
        return Err(kinds::capture_failure(codes::CAPTURE_DUP_FAILED, "dup2"));
    }
    // The stream fd now holds the pipe open; release our copy so draining
    // sees EOF once the stream is restored.
    drop(write_end);

    // Redirecting -> Draining: invoke exactly once, flush, restore.
    focal();
    guard.restore()?;

    // Draining -> Idle: read until end-of-stream.
    let mut output = CapturedOutput::default();
    let mut buf = [0u8; 4096];
    loop {
        // SAFETY: read_end is a valid pipe descriptor and buf is writable.
        let n = unsafe {
            libc::read(
                read_end.raw(),
                buf.as_mut_ptr().cast::<libc::c_void>(),
                buf.len(),
            )
        };
        match n {
            0 => break,
            n if n > 0 => {
                #[allow(clippy::cast_sign_loss)]
                output.bytes.extend_from_slice(&buf[..n as usize]);
            }
            _ => {
                return Err(kinds::capture_failure(codes::CAPTURE_DRAIN_FAILED, "read"));
            }
        }
    }
    Ok(output)
}

/// Capture standard output of one focal invocation.
pub fn capture_stdout<F: FnOnce()>(focal: F) -> Result<CapturedOutput> {
    capture_stream(CaptureStream::Stdout, focal)
}

/// Capture standard error of one focal invocation.
pub fn capture_stderr<F: FnOnce()>(focal: F) -> Result<CapturedOutput> {
    capture_stream(CaptureStream::Stderr, focal)
}

/// Description of a whole-program focal target.
#[derive(Debug, Clone)]
pub struct SpawnSpec {
    program: String,
    args: Vec<String>,
    stdin: Option<Vec<u8>>,
    timeout: Duration,
}

impl SpawnSpec {
    /// Spawn spec for `program` with a 30 second wait bound.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Bytes to feed the child on stdin.
    #[must_use]
    pub fn stdin(mut self, bytes: Vec<u8>) -> Self {
        self.stdin = Some(bytes);
        self
    }

    /// Override the wait bound. The corpus specifies no timeout at all;
    /// the bound here keeps a wedged focal binary from hanging the run.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Exit code and captured streams of a completed focal process.
#[derive(Debug)]
pub struct ProcessCapture {
    /// Exit code; `None` when the child died to a signal.
    pub exit_code: Option<i32>,
    /// Bytes the child wrote to stdout.
    pub stdout: Vec<u8>,
    /// Bytes the child wrote to stderr.
    pub stderr: Vec<u8>,
}

impl ProcessCapture {
    /// Whether the child exited 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Child stdout as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

fn set_nonblocking(fd: RawFd) -> Result<()> {
    // SAFETY: fd is a valid pipe descriptor owned by the caller.
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(kinds::capture_failure(codes::CAPTURE_PIPE_FAILED, "fcntl"));
    }
    // SAFETY: same descriptor, adding O_NONBLOCK only.
    if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } < 0 {
        return Err(kinds::capture_failure(codes::CAPTURE_PIPE_FAILED, "fcntl"));
    }
    Ok(())
}

fn drain_nonblocking(reader: &mut impl Read, sink: &mut Vec<u8>) -> Result<()> {
    let mut buf = [0u8; 4096];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => sink.extend_from_slice(&buf[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
}

/// Write as much of `bytes[*offset..]` as the pipe accepts right now.
///
/// Returns `true` once the payload is fully delivered or the child has
/// closed its end; `false` means the pipe is full and the caller should come
/// back on the next poll iteration.
fn feed_nonblocking(writer: &mut impl Write, bytes: &[u8], offset: &mut usize) -> bool {
    while *offset < bytes.len() {
        match writer.write(&bytes[*offset..]) {
            Ok(0) => return true,
            Ok(n) => *offset += n,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return false,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            // EPIPE: the child stopped reading. That is the child's
            // observable behavior, not a harness failure.
            Err(_) => return true,
        }
    }
    let _ = writer.flush();
    true
}

/// Spawn a focal binary, wait to completion with a bounded deadline, and
/// drain its streams.
///
/// The sequence is strictly synchronous: spawn, feed stdin, poll-drain both
/// pipes until exit or deadline, then collect exit code and bytes. On
/// deadline expiry the child is killed and a process-timeout error is
/// returned; the caller records it as the scenario's failure.
pub fn run_captured(spec: &SpawnSpec) -> Result<ProcessCapture> {
    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(if spec.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| kinds::process_spawn_failed(&spec.program, &e.to_string()))?;

    let mut stdin_pipe = child.stdin.take();

    let mut stdout_pipe = child.stdout.take().ok_or_else(|| {
        kinds::capture_failure(codes::CAPTURE_PIPE_FAILED, "child stdout")
    })?;
    let mut stderr_pipe = child.stderr.take().ok_or_else(|| {
        kinds::capture_failure(codes::CAPTURE_PIPE_FAILED, "child stderr")
    })?;

    {
        use std::os::unix::io::AsRawFd;
        set_nonblocking(stdout_pipe.as_raw_fd())?;
        set_nonblocking(stderr_pipe.as_raw_fd())?;
        if let Some(stdin) = &stdin_pipe {
            set_nonblocking(stdin.as_raw_fd())?;
        }
    }

    let stdin_payload = spec.stdin.as_deref().unwrap_or(&[]);
    let mut stdin_offset = 0;
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let deadline = Instant::now() + spec.timeout;

    let status = loop {
        // Stdin is fed inside the poll loop so a full pipe buffer stays
        // under the same deadline as everything else; dropping the handle
        // once the payload is delivered gives the child its EOF.
        if let Some(stdin) = stdin_pipe.as_mut() {
            if feed_nonblocking(stdin, stdin_payload, &mut stdin_offset) {
                stdin_pipe = None;
            }
        }

        drain_nonblocking(&mut stdout_pipe, &mut stdout)?;
        drain_nonblocking(&mut stderr_pipe, &mut stderr)?;

        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    log::warn!("killing focal process past deadline: {}", spec.program);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(kinds::process_timeout(&spec.program));
                }
                std::thread::sleep(Duration::from_millis(5));
            }
            Err(e) => {
                return Err(rig_error::Error::new(
                    rig_error::ErrorCategory::Process,
                    codes::PROCESS_WAIT_FAILED,
                    format!("wait failed for {}: {e}", spec.program),
                ));
            }
        }
    };

    // Final drain to end-of-stream after exit.
    drain_nonblocking(&mut stdout_pipe, &mut stdout)?;
    drain_nonblocking(&mut stderr_pipe, &mut stderr)?;

    Ok(ProcessCapture {
        exit_code: status.code(),
        stdout,
        stderr,
    })
}
