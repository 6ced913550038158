//! Startup scan of existing interface addresses.
//!
//! Runs once, before the kernel event source is armed. Seeds the LAN state
//! and, if the WAN interface already has an address, evaluates it right away
//! so a conflict present at boot is reported without waiting for a change.

use super::tracker::SubnetTracker;
use crate::models::InterfaceRole;
use crate::netlink::AddressSource;

/// What the startup scan found.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapSummary {
    pub lan_seeded: bool,
    pub wan_checked: usize,
    pub conflict: bool,
}

/// Seed `tracker` from the current address configuration.
///
/// The first IPv4 address reported for the LAN interface wins; later ones
/// are logged and skipped. Every WAN address is evaluated in report order,
/// so the last one determines the published status. Enumeration failure is
/// logged and leaves the tracker untouched.
pub fn bootstrap(tracker: &mut SubnetTracker, source: &dyn AddressSource) -> BootstrapSummary {
    let mut summary = BootstrapSummary::default();

    let addrs = match source.ipv4_addresses() {
        Ok(addrs) => addrs,
        Err(e) => {
            log::error!("Bootstrap: address enumeration failed, LAN state unknown: {e}");
            return summary;
        }
    };

    let roles = tracker.roles().clone();

    // LAN first, so a WAN address seen below is checked against it.
    for a in addrs
        .iter()
        .filter(|a| roles.resolve(&a.name) == InterfaceRole::Lan)
    {
        if summary.lan_seeded {
            log::warn!(
                "Bootstrap: extra LAN address {}/{} on {} ignored",
                a.address,
                a.prefix_length,
                a.name
            );
            continue;
        }
        log::info!("Bootstrap: LAN detected: {}", a.address);
        tracker.observe_lan(a.address, a.prefix_length);
        summary.lan_seeded = true;
    }

    for a in addrs
        .iter()
        .filter(|a| roles.resolve(&a.name) == InterfaceRole::Wan)
    {
        log::info!("Bootstrap: WAN detected: {}", a.address);
        summary.conflict = tracker.evaluate_wan(&a.name, a.address, a.prefix_length);
        summary.wan_checked += 1;
    }

    if !summary.lan_seeded {
        log::warn!(
            "Bootstrap: no IPv4 address on LAN interface {} yet",
            roles.interface(InterfaceRole::Lan).unwrap_or("?")
        );
    }
    summary
}
