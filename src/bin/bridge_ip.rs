//! bridge-ip: print the IPv4 address of a container on the default bridge network
//!
//! The container runtime is asked to inspect its `bridge` network and the
//! address of the container with exactly the given name is printed, without
//! its prefix length.
//!
//! ## Example Usage
//!
//! ```bash
//! # Address of the container named "web"
//! bridge-ip web
//!
//! # Docker binary outside PATH, through sudo
//! bridge-ip --runtime /usr/local/bin/docker --sudo web
//! ```
//!
//! The runtime must print Docker's `network inspect` format: a `bridge`
//! network with a `Containers` map of `Name`/`IPv4Address` entries.
//!
//! ## Exit Status
//!
//! - `0`: address printed to stdout
//! - `1`: no such container (or the name is not unique)
//! - runtime's own status when `network inspect` fails
//! - `126`/`127`: runtime program not executable / not found
//! - `2`: runtime output could not be read, or bad arguments

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod bridge_cli;

use bridge_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    bridge_cli::init_logging(cli.verbose)?;
    cli.execute()
}
