//! IPv4 address and prefix utilities.
//!
//! Provides [`Ipv4`] for an address together with its prefix length, and the
//! mask helpers the conflict rule is built on. Every helper here is total:
//! any address and any prefix length yields a defined result.

use std::error::Error;
use std::fmt;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a prefix length to a contiguous high-order netmask.
///
/// Prefix lengths above 32 are clamped to 32.
///
/// # Examples
/// ```
/// use subnet_overlap_monitor::models::mask_for;
/// assert_eq!(mask_for(24), 0xFFFFFF00);
/// assert_eq!(mask_for(0), 0);
/// ```
pub fn mask_for(len: u8) -> u32 {
    if len == 0 {
        return 0;
    }
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;

    ((all_bits >> right_len) << right_len) as u32
}

/// Get the network address (host bits zeroed) for a given IP and prefix length.
pub fn network_of(addr: Ipv4Addr, len: u8) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(addr) & mask_for(len))
}

/// Count the leading set bits of a netmask (255.255.255.0 -> 24).
///
/// Counting stops at the first clear bit, so a non-contiguous mask yields
/// the length of its contiguous head.
pub fn prefix_from_netmask(mask: Ipv4Addr) -> u8 {
    u32::from(mask).leading_ones() as u8
}

/// IPv4 address with its prefix length.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "192.168.1.1/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err("Invalid address/mask".into());
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        let mask: u8 = parts[1].parse()?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Get the network address of this subnet.
    pub fn network(&self) -> Ipv4Addr {
        network_of(self.addr, self.mask)
    }

    /// The same prefix with host bits cleared, e.g. `192.168.1.0/24`.
    pub fn subnet(&self) -> Ipv4 {
        Ipv4 {
            addr: self.network(),
            mask: self.mask,
        }
    }
}

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
