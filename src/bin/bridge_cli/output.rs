//! Rendering of lookup outcomes to stdout/stderr, and their exit status.
//!
//! stdout only ever carries the bare address. Every failure is a single
//! `ERROR:` line on stderr, preceded by the runtime's own stderr when the
//! runtime itself failed.

use std::io::{self, Write};

use bridge_ip_core::{LookupOutcome, UpstreamError, BRIDGE_NETWORK};

/// Exit status for a missing or ambiguous container.
pub const EXIT_NOT_FOUND: u8 = 1;
/// Exit status for any other runtime failure without a usable code of its own.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status when the runtime's output cannot be read.
pub const EXIT_MALFORMED: u8 = 2;
/// Shell conventions for programs that cannot be executed.
pub const EXIT_NOT_EXECUTABLE: u8 = 126;
pub const EXIT_COMMAND_NOT_FOUND: u8 = 127;

/// Write `outcome` for container `name` and return the exit status.
pub fn render<O: Write, E: Write>(
    name: &str,
    outcome: &LookupOutcome,
    out: &mut O,
    err: &mut E,
) -> io::Result<u8> {
    match outcome {
        LookupOutcome::Found(addr) => {
            writeln!(out, "{}", addr)?;
            Ok(0)
        }
        LookupOutcome::NotFound => {
            writeln!(err, "ERROR: IP for container {} not found", name)?;
            Ok(EXIT_NOT_FOUND)
        }
        LookupOutcome::Ambiguous(_) => {
            writeln!(
                err,
                "ERROR: multiple containers named {} on network {}",
                name, BRIDGE_NETWORK
            )?;
            Ok(EXIT_NOT_FOUND)
        }
        LookupOutcome::Upstream(upstream) => {
            if let UpstreamError::Exited { stderr, .. } = upstream {
                if !stderr.is_empty() {
                    err.write_all(stderr.as_bytes())?;
                    if !stderr.ends_with('\n') {
                        writeln!(err)?;
                    }
                }
            }
            writeln!(err, "ERROR: {}", upstream)?;
            Ok(upstream_status(upstream))
        }
    }
}

/// Exit status for a failed runtime invocation.
pub fn upstream_status(err: &UpstreamError) -> u8 {
    match err {
        UpstreamError::Spawn { source, .. } => match source.kind() {
            io::ErrorKind::NotFound => EXIT_COMMAND_NOT_FOUND,
            io::ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
            _ => EXIT_FAILURE,
        },
        UpstreamError::Exited { code: Some(code), .. } => match u8::try_from(*code) {
            Ok(0) | Err(_) => EXIT_FAILURE,
            Ok(code) => code,
        },
        UpstreamError::Exited { code: None, .. } => EXIT_FAILURE,
        UpstreamError::Malformed { .. } => EXIT_MALFORMED,
    }
}
