//! Network inspection records.
//!
//! `<runtime> network inspect <network>` prints a JSON array with one object
//! per inspected network. Only the fields needed to map a container name to
//! its address are modelled; everything else in the document is ignored.
//!
//! ```json
//! [
//!   {
//!     "Name": "bridge",
//!     "Containers": {
//!       "3f1c...": { "Name": "web", "IPv4Address": "172.17.0.5/16", "IPv6Address": "" }
//!     }
//!   }
//! ]
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// One inspected network.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkRecord {
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Attached containers keyed by container id.
    ///
    /// Runtimes print `{}`, `null`, or omit the key entirely for a network
    /// with nothing attached.
    #[serde(rename = "Containers", default)]
    pub containers: Option<BTreeMap<String, ContainerEntry>>,
}

impl NetworkRecord {
    /// Iterate over attached container entries, in container-id order.
    pub fn entries(&self) -> impl Iterator<Item = &ContainerEntry> + '_ {
        self.containers.iter().flat_map(|map| map.values())
    }
}

/// A container attached to a network.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerEntry {
    /// `None` when the runtime omits the name; such an entry matches no lookup.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    /// Address with prefix length, e.g. `172.17.0.5/16`. Empty when the
    /// container has no IPv4 address on this network.
    #[serde(rename = "IPv4Address", default)]
    pub ipv4_address: String,
}

impl ContainerEntry {
    /// Exact, case-sensitive name comparison. Nameless entries never match.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// The entry's address with the prefix length stripped.
    pub fn address(&self) -> BridgeAddress {
        BridgeAddress::from_cidr(&self.ipv4_address)
    }
}

/// A container address on the bridge network, without prefix length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeAddress(String);

impl BridgeAddress {
    /// Keep everything before the first `/`.
    ///
    /// Input without a `/` is kept whole.
    pub fn from_cidr(cidr: &str) -> Self {
        let addr = cidr.split('/').next().unwrap_or_default();
        BridgeAddress(addr.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BridgeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse the raw stdout of a network inspection.
pub fn parse_records(raw: &str) -> Result<Vec<NetworkRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}
