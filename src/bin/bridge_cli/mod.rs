//! Command-line surface for bridge-ip.

pub mod output;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bridge_ip_core::inspect::DEFAULT_RUNTIME;
use bridge_ip_core::{resolve, Privilege, RuntimeConfig, RuntimeInspector};

#[derive(Parser, Debug)]
#[command(
    name = "bridge-ip",
    author,
    version,
    about = "Print the IPv4 address of a container on the default bridge network",
    long_about = "Print the IPv4 address of a container on the default bridge network.\n\n\
                  Runs `<runtime> network inspect bridge` and prints the address of the \
                  container whose name matches exactly, without the prefix length."
)]
pub struct Cli {
    /// Container name (exact, case-sensitive match)
    #[arg(value_name = "NAME", default_value = "", hide_default_value = true)]
    pub name: String,

    /// Container runtime program used for `network inspect`
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "BRIDGE_IP_RUNTIME",
        default_value = DEFAULT_RUNTIME
    )]
    pub runtime: OsString,

    /// Run the runtime through `sudo` (when the daemon socket needs elevated rights)
    #[arg(long, env = "BRIDGE_IP_SUDO", value_parser = FalseyValueParser::new())]
    pub sudo: bool,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            runtime: self.runtime.clone(),
            privilege: if self.sudo {
                Privilege::Sudo
            } else {
                Privilege::Inherit
            },
        }
    }

    /// Run the lookup and report it. Returns the process exit status.
    pub fn execute(&self) -> Result<u8> {
        let config = self.runtime_config();
        debug!(runtime = ?config.runtime, privilege = ?config.privilege, name = %self.name, "looking up container");

        let inspector = RuntimeInspector::new(config);
        let outcome = resolve(&inspector, &self.name);

        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut out = stdout.lock();
        let mut err = stderr.lock();

        let status = output::render(&self.name, &outcome, &mut out, &mut err)
            .context("write lookup result")?;
        out.flush().context("flush stdout")?;

        Ok(status)
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise logging is off unless `verbose`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        "bridge_ip=debug,bridge_ip_core=debug"
    } else {
        "off"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .try_init()
        .context("initialize logging")
}
