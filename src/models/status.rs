//! Conflict status record and its wire shape.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Message for a snapshot that reports a conflict.
pub const MSG_CONFLICT: &str = "Subnet conflict detected!";
/// Message for a snapshot without a conflict, including the initial one.
pub const MSG_NO_CONFLICT: &str = "No conflicts detected";
/// Message carried by an `update` event that reports no conflict.
pub const MSG_RESOLVED: &str = "Conflict resolved";
/// Rendering of an address that was never observed.
pub const ADDR_UNKNOWN: &str = "N/A";

/// Outcome of the most recent WAN evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictStatus {
    pub conflict: bool,
    /// Textual WAN address; empty until the first push.
    pub wan_ip: String,
    /// Textual LAN address; empty while the LAN is unknown.
    pub lan_ip: String,
    pub message: String,
}

impl ConflictStatus {
    pub fn new(conflict: bool, wan_ip: Ipv4Addr, lan_ip: Ipv4Addr) -> ConflictStatus {
        ConflictStatus {
            conflict,
            wan_ip: addr_text(wan_ip),
            lan_ip: addr_text(lan_ip),
            message: status_message(conflict).to_string(),
        }
    }

    /// Reply to the `status` method.
    pub fn to_reply(&self) -> StatusReply {
        StatusReply {
            conflict: self.conflict as u32,
            wan_ip: or_unknown(&self.wan_ip),
            lan_ip: or_unknown(&self.lan_ip),
            message: self.message.clone(),
        }
    }

    /// Payload of the `update` event emitted on every push.
    pub fn to_update(&self) -> StatusReply {
        StatusReply {
            conflict: self.conflict as u32,
            wan_ip: or_unknown(&self.wan_ip),
            lan_ip: or_unknown(&self.lan_ip),
            message: update_message(self.conflict).to_string(),
        }
    }
}

impl Default for ConflictStatus {
    fn default() -> Self {
        ConflictStatus {
            conflict: false,
            wan_ip: String::new(),
            lan_ip: String::new(),
            message: MSG_NO_CONFLICT.to_string(),
        }
    }
}

/// `{conflict, wan_ip, lan_ip, message}` as exchanged with external observers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusReply {
    pub conflict: u32,
    pub wan_ip: String,
    pub lan_ip: String,
    pub message: String,
}

pub fn status_message(conflict: bool) -> &'static str {
    if conflict {
        MSG_CONFLICT
    } else {
        MSG_NO_CONFLICT
    }
}

pub fn update_message(conflict: bool) -> &'static str {
    if conflict {
        MSG_CONFLICT
    } else {
        MSG_RESOLVED
    }
}

// 0.0.0.0 means "never observed" for the tracker's LAN state.
fn addr_text(addr: Ipv4Addr) -> String {
    if addr.is_unspecified() {
        String::new()
    } else {
        addr.to_string()
    }
}

fn or_unknown(s: &str) -> String {
    if s.is_empty() {
        ADDR_UNKNOWN.to_string()
    } else {
        s.to_string()
    }
}
