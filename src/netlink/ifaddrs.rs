//! Snapshot of currently configured IPv4 addresses.

use crate::models::prefix_from_netmask;
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddrV4};

/// One IPv4 address assigned to an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    pub name: String,
    pub address: Ipv4Addr,
    pub prefix_length: u8,
}

/// Source of the current address configuration.
///
/// Implementations return addresses in whatever order the platform reports
/// them; callers must not rely on it.
pub trait AddressSource {
    fn ipv4_addresses(&self) -> Result<Vec<InterfaceAddress>, Box<dyn Error>>;
}

/// `getifaddrs(3)` backed source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAddresses;

impl AddressSource for SystemAddresses {
    fn ipv4_addresses(&self) -> Result<Vec<InterfaceAddress>, Box<dyn Error>> {
        let addrs = nix::ifaddrs::getifaddrs().map_err(|e| format!("getifaddrs failed: {e}"))?;

        let mut found = Vec::new();
        for ifa in addrs {
            let Some(address) = ifa.address.as_ref().and_then(|a| a.as_sockaddr_in()) else {
                continue;
            };
            let address = *SocketAddrV4::from(*address).ip();
            let prefix_length = ifa
                .netmask
                .as_ref()
                .and_then(|m| m.as_sockaddr_in())
                .map(|m| prefix_from_netmask(*SocketAddrV4::from(*m).ip()))
                .unwrap_or(0);

            log::trace!("{}: {address}/{prefix_length}", ifa.interface_name);
            found.push(InterfaceAddress {
                name: ifa.interface_name,
                address,
                prefix_length,
            });
        }
        Ok(found)
    }
}

/// Fixed address list, for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct StaticAddresses(pub Vec<InterfaceAddress>);

impl AddressSource for StaticAddresses {
    fn ipv4_addresses(&self) -> Result<Vec<InterfaceAddress>, Box<dyn Error>> {
        Ok(self.0.clone())
    }
}
