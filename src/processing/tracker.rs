//! LAN/WAN subnet overlap detection.
//!
//! The tracker owns the LAN network/address pair. LAN events update it in
//! place; WAN events are evaluated against it and the outcome is pushed to
//! the [`StatusPublisher`] whether or not a conflict was found.

use crate::models::{network_of, AddressEvent, EventKind, InterfaceRole, Ipv4, RoleMap};
use crate::publish::StatusPublisher;
use colored::Colorize;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Latest LAN observation. All-zero until the first LAN event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetState {
    pub lan_address: Ipv4Addr,
    /// Always `lan_address` masked by `lan_prefix`.
    pub lan_network: Ipv4Addr,
    pub lan_prefix: u8,
}

impl Default for SubnetState {
    fn default() -> Self {
        SubnetState {
            lan_address: Ipv4Addr::UNSPECIFIED,
            lan_network: Ipv4Addr::UNSPECIFIED,
            lan_prefix: 0,
        }
    }
}

impl SubnetState {
    /// A zero network means no LAN address has been seen.
    pub fn is_known(&self) -> bool {
        !self.lan_network.is_unspecified()
    }
}

/// Decide whether a WAN network collides with the tracked LAN network.
///
/// Unknown LAN state never yields a conflict.
pub fn is_conflict(lan_network: Ipv4Addr, wan_network: Ipv4Addr) -> bool {
    !lan_network.is_unspecified() && wan_network == lan_network
}

pub struct SubnetTracker {
    roles: RoleMap,
    state: SubnetState,
    publisher: Arc<StatusPublisher>,
}

impl SubnetTracker {
    pub fn new(roles: RoleMap, publisher: Arc<StatusPublisher>) -> Self {
        SubnetTracker {
            roles,
            state: SubnetState::default(),
            publisher,
        }
    }

    pub fn state(&self) -> SubnetState {
        self.state
    }

    pub fn roles(&self) -> &RoleMap {
        &self.roles
    }

    pub fn publisher(&self) -> &Arc<StatusPublisher> {
        &self.publisher
    }

    /// Apply one decoded address event.
    ///
    /// Only `Added` events on a LAN or WAN interface have any effect.
    pub fn on_address_event(&mut self, evt: &AddressEvent) {
        if evt.event_kind != EventKind::Added {
            log::debug!("Ignoring {evt}");
            return;
        }
        match self.roles.resolve(&evt.interface_name) {
            InterfaceRole::Lan => self.observe_lan(evt.address, evt.prefix_length),
            InterfaceRole::Wan => {
                self.evaluate_wan(&evt.interface_name, evt.address, evt.prefix_length);
            }
            InterfaceRole::Ignored => {
                log::trace!("Ignoring {evt} (no role)");
            }
        }
    }

    /// Record a LAN address. Does not publish.
    pub fn observe_lan(&mut self, address: Ipv4Addr, prefix: u8) {
        self.state = SubnetState {
            lan_address: address,
            lan_network: network_of(address, prefix),
            lan_prefix: prefix,
        };
        let subnet = Ipv4 {
            addr: address,
            mask: prefix,
        }
        .subnet();
        log::info!("LAN subnet monitored: {subnet} (address {address})");
    }

    /// Check a WAN address against the LAN and publish the outcome.
    pub fn evaluate_wan(&mut self, ifname: &str, address: Ipv4Addr, prefix: u8) -> bool {
        let network = network_of(address, prefix);
        let conflict = is_conflict(self.state.lan_network, network);

        self.publisher
            .push(conflict, address, self.state.lan_address);

        if conflict {
            log::error!(
                "{} detected on {ifname}: WAN {address}/{prefix} is inside LAN subnet {}/{}",
                "CONFLICT".on_red(),
                self.state.lan_network,
                self.state.lan_prefix
            );
        } else if !self.state.is_known() {
            log::info!("WAN interface {ifname} checked ({address}/{prefix}), LAN subnet unknown");
        } else {
            log::info!("WAN interface {ifname} checked, no conflict with LAN");
        }
        conflict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConflictStatus;

    fn tracker() -> SubnetTracker {
        SubnetTracker::new(RoleMap::default(), Arc::new(StatusPublisher::new()))
    }

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    #[test]
    fn test_is_conflict() {
        assert!(is_conflict(ip("192.168.1.0"), ip("192.168.1.0")));
        assert!(!is_conflict(ip("192.168.1.0"), ip("10.0.0.0")));
        assert!(!is_conflict(Ipv4Addr::UNSPECIFIED, Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn test_lan_then_conflicting_wan() {
        let mut t = tracker();
        t.on_address_event(&AddressEvent::added("br-lan", ip("192.168.1.1"), 24));
        t.on_address_event(&AddressEvent::added("eth1", ip("192.168.1.50"), 24));

        let status = t.publisher().query();
        assert!(status.conflict);
        assert_eq!(status.wan_ip, "192.168.1.50");
        assert_eq!(status.lan_ip, "192.168.1.1");
    }

    #[test]
    fn test_wan_event_publishes_through_dispatch() {
        let mut t = tracker();
        let mut rx = t.publisher().subscribe();
        t.on_address_event(&AddressEvent::added("br-lan", ip("192.168.1.1"), 24));
        t.on_address_event(&AddressEvent::added("eth1", ip("192.168.1.50"), 24));

        let pushed = rx.try_recv().unwrap();
        assert!(pushed.conflict);
        assert_eq!(pushed, t.publisher().query());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_lan_then_distinct_wan() {
        let mut t = tracker();
        t.on_address_event(&AddressEvent::added("br-lan", ip("192.168.1.1"), 24));
        t.on_address_event(&AddressEvent::added("eth1", ip("10.0.0.5"), 24));

        assert!(!t.publisher().query().conflict);
    }

    #[test]
    fn test_wan_before_lan_never_conflicts() {
        let mut t = tracker();
        t.on_address_event(&AddressEvent::added("eth1", ip("0.0.0.1"), 0));
        let status = t.publisher().query();
        assert!(!status.conflict);
        assert_eq!(status.message, ConflictStatus::default().message);
    }

    #[test]
    fn test_lan_update_does_not_publish() {
        let mut t = tracker();
        let mut rx = t.publisher().subscribe();
        t.on_address_event(&AddressEvent::added("br-lan", ip("192.168.1.1"), 24));

        assert!(rx.try_recv().is_err());
        assert_eq!(t.publisher().query(), ConflictStatus::default());
        assert_eq!(t.state().lan_network, ip("192.168.1.0"));
        assert_eq!(t.state().lan_address, ip("192.168.1.1"));
    }

    #[test]
    fn test_status_stale_until_next_wan() {
        let mut t = tracker();
        t.on_address_event(&AddressEvent::added("br-lan", ip("192.168.1.1"), 24));
        t.on_address_event(&AddressEvent::added("eth1", ip("192.168.1.50"), 24));
        // LAN moves away; the snapshot keeps the last WAN evaluation.
        t.on_address_event(&AddressEvent::added("br-lan", ip("192.168.8.1"), 24));
        assert!(t.publisher().query().conflict);

        t.on_address_event(&AddressEvent::added("eth1", ip("192.168.1.50"), 24));
        assert!(!t.publisher().query().conflict);
    }

    #[test]
    fn test_removed_and_other_events_ignored() {
        let mut t = tracker();
        let mut evt = AddressEvent::added("br-lan", ip("192.168.1.1"), 24);
        evt.event_kind = EventKind::Removed;
        t.on_address_event(&evt);
        evt.event_kind = EventKind::Other;
        t.on_address_event(&evt);
        assert_eq!(t.state(), SubnetState::default());
    }

    #[test]
    fn test_prefix_differences() {
        let mut t = tracker();
        t.observe_lan(ip("10.1.2.3"), 16);
        // Same /16 network only when the WAN prefix also yields 10.1.0.0.
        assert!(t.evaluate_wan("eth1", ip("10.1.200.9"), 16));
        assert!(!t.evaluate_wan("eth1", ip("10.1.200.9"), 24));
    }
}
