//! Name to address lookup on the default bridge network.

use tracing::{debug, warn};

use crate::inspect::{NetworkInspector, UpstreamError};
use crate::record::{parse_records, BridgeAddress, NetworkRecord};

/// Network every container joins when no other network is requested.
pub const BRIDGE_NETWORK: &str = "bridge";

/// Result of looking a container up by name.
#[derive(Debug)]
pub enum LookupOutcome {
    /// Exactly one attached container carries the name.
    Found(BridgeAddress),
    /// No attached container with an IPv4 address carries the name.
    NotFound,
    /// Several attached containers carry the name. Runtimes keep names unique,
    /// so this only happens with a misbehaving runtime.
    Ambiguous(Vec<BridgeAddress>),
    /// The runtime could not produce an inspection record.
    Upstream(UpstreamError),
}

/// Look up the bridge address of the container called `name`.
///
/// Matching is exact byte equality on the container name. The name is not
/// validated; an empty name simply matches nothing.
pub fn resolve<I: NetworkInspector + ?Sized>(inspector: &I, name: &str) -> LookupOutcome {
    let output = match inspector.inspect(BRIDGE_NETWORK) {
        Ok(output) => output,
        Err(err) => return LookupOutcome::Upstream(err),
    };

    if output.stdout.trim().is_empty() {
        return LookupOutcome::Upstream(UpstreamError::Malformed {
            invocation: output.invocation,
            detail: "empty output".to_string(),
        });
    }

    let records = match parse_records(&output.stdout) {
        Ok(records) => records,
        Err(e) => {
            return LookupOutcome::Upstream(UpstreamError::Malformed {
                invocation: output.invocation,
                detail: e.to_string(),
            })
        }
    };

    select(&records, name)
}

/// Pick the address of `name` out of already parsed records.
pub fn select(records: &[NetworkRecord], name: &str) -> LookupOutcome {
    let mut matches: Vec<BridgeAddress> = records
        .iter()
        .flat_map(|record| record.entries())
        .filter(|entry| entry.is_named(name))
        .map(|entry| entry.address())
        .filter(|addr| !addr.is_empty())
        .collect();

    debug!(name, matches = matches.len(), "filtered bridge containers");

    match matches.len() {
        0 => LookupOutcome::NotFound,
        1 => LookupOutcome::Found(matches.remove(0)),
        _ => {
            warn!(name, count = matches.len(), "container name is not unique");
            LookupOutcome::Ambiguous(matches)
        }
    }
}
