//! Container runtime invocation.
//!
//! The runtime is only ever asked for `network inspect <network>`. Arguments
//! are passed as a structured argv, never through a shell, and the container
//! name being looked up is not part of the invocation at all.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

/// Default runtime program.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Privilege escalation program used for [`Privilege::Sudo`].
pub const SUDO: &str = "sudo";

/// How the runtime process gets the rights it needs to talk to the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Privilege {
    /// Run the runtime with the caller's own rights.
    #[default]
    Inherit,
    /// Run the runtime through `sudo --`.
    Sudo,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Runtime program, looked up on `PATH` unless it is a path.
    pub runtime: OsString,
    pub privilege: Privilege,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            runtime: OsString::from(DEFAULT_RUNTIME),
            privilege: Privilege::Inherit,
        }
    }
}

/// Failure to obtain a usable inspection record from the runtime.
#[derive(Debug)]
pub enum UpstreamError {
    /// The program could not be started.
    Spawn { program: String, source: io::Error },
    /// The program ran and exited unsuccessfully. `code` is `None` when it
    /// was terminated by a signal.
    Exited {
        invocation: String,
        code: Option<i32>,
        stderr: String,
    },
    /// The program succeeded but its output is not an inspection record.
    Malformed { invocation: String, detail: String },
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Spawn { program, source } => {
                write!(f, "failed to run `{}`: {}", program, source)
            }
            UpstreamError::Exited {
                invocation,
                code: Some(code),
                ..
            } => write!(f, "`{}` exited with status {}", invocation, code),
            UpstreamError::Exited {
                invocation,
                code: None,
                ..
            } => write!(f, "`{}` was terminated by a signal", invocation),
            UpstreamError::Malformed { invocation, detail } => {
                write!(f, "unreadable output from `{}`: {}", invocation, detail)
            }
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Raw stdout of a successful inspection.
#[derive(Debug, Clone)]
pub struct InspectOutput {
    /// Human-readable command line, used in diagnostics.
    pub invocation: String,
    pub stdout: String,
}

/// Source of network inspection output.
pub trait NetworkInspector {
    fn inspect(&self, network: &str) -> Result<InspectOutput, UpstreamError>;
}

/// Inspector backed by the container runtime's CLI.
#[derive(Debug, Clone, Default)]
pub struct RuntimeInspector {
    config: RuntimeConfig,
}

impl RuntimeInspector {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// Build the process invocation for inspecting `network`.
    pub fn command(&self, network: &str) -> Command {
        let mut cmd = match self.config.privilege {
            Privilege::Inherit => Command::new(&self.config.runtime),
            Privilege::Sudo => {
                let mut cmd = Command::new(SUDO);
                cmd.arg("--").arg(&self.config.runtime);
                cmd
            }
        };
        cmd.args(["network", "inspect", network]);
        cmd.stdin(Stdio::null());
        cmd
    }
}

fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

impl NetworkInspector for RuntimeInspector {
    fn inspect(&self, network: &str) -> Result<InspectOutput, UpstreamError> {
        let mut cmd = self.command(network);
        let invocation = describe(&cmd);
        debug!(%invocation, "inspecting network");

        let output = cmd.output().map_err(|source| UpstreamError::Spawn {
            program: cmd.get_program().to_string_lossy().into_owned(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            debug!(status = %output.status, "runtime reported failure");
            return Err(UpstreamError::Exited {
                invocation,
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| UpstreamError::Malformed {
            invocation: invocation.clone(),
            detail: format!("output is not UTF-8: {}", e),
        })?;
        trace!(bytes = stdout.len(), "runtime output received");

        Ok(InspectOutput { invocation, stdout })
    }
}
