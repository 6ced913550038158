//! Domain models for the subnet overlap monitor.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 address with prefix length, plus mask helpers
//! - [`InterfaceRole`] and [`RoleMap`] - LAN/WAN role binding
//! - [`AddressEvent`] - a decoded address notification
//! - [`ConflictStatus`] - the published conflict snapshot

mod event;
mod ipv4;
mod role;
mod status;

// Re-export public types
pub use event::{AddressEvent, EventKind};
pub use ipv4::{mask_for, network_of, prefix_from_netmask, Ipv4, MAX_LENGTH};
pub use role::{InterfaceRole, RoleMap};
pub use status::{
    status_message, update_message, ConflictStatus, StatusReply, ADDR_UNKNOWN, MSG_CONFLICT,
    MSG_NO_CONFLICT, MSG_RESOLVED,
};
