//! Interface role mapping.

use crate::config::{DEFAULT_LAN_IF, DEFAULT_WAN_IF};
use std::collections::HashMap;
use std::error::Error;

/// Logical side of the gateway an interface belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceRole {
    Lan,
    Wan,
    Ignored,
}

/// Closed mapping from interface name to role, built once at startup.
///
/// Any name not in the map resolves to [`InterfaceRole::Ignored`].
#[derive(Debug, Clone)]
pub struct RoleMap {
    roles: HashMap<String, InterfaceRole>,
}

impl RoleMap {
    /// Bind `lan` to the LAN role and `wan` to the WAN role.
    pub fn new(lan: &str, wan: &str) -> Result<RoleMap, Box<dyn Error>> {
        let (lan, wan) = (lan.trim(), wan.trim());
        if lan.is_empty() || wan.is_empty() {
            return Err("LAN and WAN interface names must not be empty".into());
        }
        if lan == wan {
            return Err(format!("LAN and WAN cannot share interface {lan}").into());
        }

        let mut roles = HashMap::new();
        roles.insert(lan.to_string(), InterfaceRole::Lan);
        roles.insert(wan.to_string(), InterfaceRole::Wan);
        Ok(RoleMap { roles })
    }

    pub fn resolve(&self, name: &str) -> InterfaceRole {
        self.roles
            .get(name)
            .copied()
            .unwrap_or(InterfaceRole::Ignored)
    }

    /// Name bound to `role`, if any.
    pub fn interface(&self, role: InterfaceRole) -> Option<&str> {
        self.roles
            .iter()
            .find(|(_, r)| **r == role)
            .map(|(name, _)| name.as_str())
    }
}

impl Default for RoleMap {
    /// The conventional OpenWrt layout: `br-lan` bridge and `eth1` uplink.
    fn default() -> Self {
        let mut roles = HashMap::new();
        roles.insert(DEFAULT_LAN_IF.to_string(), InterfaceRole::Lan);
        roles.insert(DEFAULT_WAN_IF.to_string(), InterfaceRole::Wan);
        RoleMap { roles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default() {
        let roles = RoleMap::default();
        assert_eq!(roles.resolve("br-lan"), InterfaceRole::Lan);
        assert_eq!(roles.resolve("eth1"), InterfaceRole::Wan);
        assert_eq!(roles.resolve("eth0"), InterfaceRole::Ignored);
        assert_eq!(roles.resolve(""), InterfaceRole::Ignored);
    }

    #[test]
    fn test_default_matches_config_defaults() {
        let roles = RoleMap::default();
        assert_eq!(roles.interface(InterfaceRole::Lan), Some(DEFAULT_LAN_IF));
        assert_eq!(roles.interface(InterfaceRole::Wan), Some(DEFAULT_WAN_IF));
        let from_config = crate::config::Config::default().roles().unwrap();
        assert_eq!(from_config.interface(InterfaceRole::Lan), Some(DEFAULT_LAN_IF));
        assert_eq!(from_config.interface(InterfaceRole::Wan), Some(DEFAULT_WAN_IF));
    }

    #[test]
    fn test_interface_lookup() {
        let roles = RoleMap::new("lan0", "wan0").unwrap();
        assert_eq!(roles.interface(InterfaceRole::Lan), Some("lan0"));
        assert_eq!(roles.interface(InterfaceRole::Wan), Some("wan0"));
        assert_eq!(roles.interface(InterfaceRole::Ignored), None);
    }

    #[test]
    fn test_new_rejects_bad_names() {
        assert!(RoleMap::new("", "eth1").is_err());
        assert!(RoleMap::new("br-lan", "  ").is_err());
        assert!(RoleMap::new("eth1", "eth1").is_err());
    }
}
