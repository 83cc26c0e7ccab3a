//! Container address lookup on a container runtime's default bridge network.
//!
//! The runtime is asked to inspect the `bridge` network and the returned
//! record is searched for a container with an exact name match.
//!
//! ```no_run
//! use bridge_ip_core::{resolve, LookupOutcome, RuntimeInspector};
//!
//! let inspector = RuntimeInspector::default();
//! if let LookupOutcome::Found(addr) = resolve(&inspector, "web") {
//!     println!("{addr}");
//! }
//! ```

pub mod inspect;
pub mod lookup;
pub mod record;

pub use inspect::{
    InspectOutput, NetworkInspector, Privilege, RuntimeConfig, RuntimeInspector, UpstreamError,
};
pub use lookup::{resolve, LookupOutcome, BRIDGE_NETWORK};
pub use record::{BridgeAddress, ContainerEntry, NetworkRecord};
