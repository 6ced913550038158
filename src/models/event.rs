//! Decoded address notifications.

use super::Ipv4;
use std::fmt;
use std::net::Ipv4Addr;

/// What happened to the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Added,
    Removed,
    Other,
}

/// One decoded IPv4 address notification, consumed once by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEvent {
    pub interface_name: String,
    pub address: Ipv4Addr,
    pub prefix_length: u8,
    pub event_kind: EventKind,
}

impl AddressEvent {
    /// An `Added` event, the only kind that drives the conflict rule.
    pub fn added(interface_name: &str, address: Ipv4Addr, prefix_length: u8) -> AddressEvent {
        AddressEvent {
            interface_name: interface_name.to_string(),
            address,
            prefix_length,
            event_kind: EventKind::Added,
        }
    }

    pub fn cidr(&self) -> Ipv4 {
        Ipv4 {
            addr: self.address,
            mask: self.prefix_length,
        }
    }
}

impl fmt::Display for AddressEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} {} on {}",
            self.event_kind,
            self.cidr(),
            self.interface_name
        )
    }
}
