//! Single-slot conflict status store with fan-out notification.
//!
//! The publisher never decides anything: the tracker pushes, queriers pull,
//! subscribers receive one update per push.

use crate::models::ConflictStatus;
use std::net::Ipv4Addr;
use tokio::sync::{broadcast, watch};

/// Updates buffered per subscriber before a slow one starts lagging.
const UPDATE_CAPACITY: usize = 64;

/// Holds the latest [`ConflictStatus`] and broadcasts every push.
pub struct StatusPublisher {
    /// Latest snapshot; replaced whole on each push.
    slot: watch::Sender<ConflictStatus>,
    /// Bus for `update` notifications.
    bus: broadcast::Sender<ConflictStatus>,
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPublisher {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(ConflictStatus::default());
        let (bus, _rx) = broadcast::channel::<ConflictStatus>(UPDATE_CAPACITY);
        Self { slot, bus }
    }

    /// Overwrite the snapshot and notify subscribers with the same fields.
    ///
    /// Repeated identical pushes each produce a notification.
    pub fn push(&self, detected: bool, wan_ip: Ipv4Addr, lan_ip: Ipv4Addr) {
        let status = ConflictStatus::new(detected, wan_ip, lan_ip);
        log::info!(
            "Notifying conflict status - detected={}, wan={}, lan={}",
            detected,
            status.wan_ip,
            status.lan_ip
        );
        self.slot.send_replace(status.clone());
        // No subscribers is not an error.
        let _ = self.bus.send(status);
    }

    /// Current snapshot; the documented default until the first push.
    pub fn query(&self) -> ConflictStatus {
        self.slot.borrow().clone()
    }

    /// Receive every subsequent push.
    pub fn subscribe(&self) -> broadcast::Receiver<ConflictStatus> {
        self.bus.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.receiver_count()
    }
}
