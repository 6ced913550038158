//! Kernel-facing address primitives.
//!
//! This module isolates everything that touches the host's network stack:
//! - [`ifaddrs`] - one-shot enumeration of configured IPv4 addresses
//! - [`names`] - interface index to name resolution
//! - [`decode`] - rtnetlink record decoding into [`AddressEvent`](crate::models::AddressEvent)
//! - [`socket`] - the multicast notification socket

mod decode;
mod ifaddrs;
mod names;
mod socket;

// Re-export public types and functions
pub use decode::{address_event, decode_events, RECV_BUFFER_SIZE};
pub use ifaddrs::{AddressSource, InterfaceAddress, StaticAddresses, SystemAddresses};
pub use names::{InterfaceNames, StaticInterfaceNames, SystemInterfaceNames};
pub use socket::NetlinkListener;
