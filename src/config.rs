//! Startup configuration.
//!
//! Read once from the environment (after `.env` is loaded); there is no
//! reconfiguration while running.

use crate::models::RoleMap;
use std::error::Error;
use std::path::PathBuf;

pub const ENV_LAN_IF: &str = "SUBNET_MONITOR_LAN_IF";
pub const ENV_WAN_IF: &str = "SUBNET_MONITOR_WAN_IF";
pub const ENV_SOCKET: &str = "SUBNET_MONITOR_SOCKET";
pub const ENV_LOG_CONFIG: &str = "SUBNET_MONITOR_LOG_CONFIG";

pub const DEFAULT_LAN_IF: &str = "br-lan";
pub const DEFAULT_WAN_IF: &str = "eth1";
pub const DEFAULT_SOCKET: &str = "/var/run/subnet-overlap-monitor.sock";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface bound to the LAN role.
    pub lan_interface: String,
    /// Interface bound to the WAN role.
    pub wan_interface: String,
    /// Path of the `network.conflict` control socket.
    pub control_socket: PathBuf,
    /// log4rs configuration file.
    pub log_config: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lan_interface: DEFAULT_LAN_IF.to_string(),
            wan_interface: DEFAULT_WAN_IF.to_string(),
            control_socket: PathBuf::from(DEFAULT_SOCKET),
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let config = Config {
            lan_interface: get(ENV_LAN_IF, DEFAULT_LAN_IF),
            wan_interface: get(ENV_WAN_IF, DEFAULT_WAN_IF),
            control_socket: PathBuf::from(get(ENV_SOCKET, DEFAULT_SOCKET)),
            log_config: PathBuf::from(get(ENV_LOG_CONFIG, DEFAULT_LOG_CONFIG)),
        };
        // Fail early on an unusable role binding.
        config.roles()?;
        Ok(config)
    }

    pub fn roles(&self) -> Result<RoleMap, Box<dyn Error>> {
        RoleMap::new(&self.lan_interface, &self.wan_interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InterfaceRole;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        let roles = config.roles().unwrap();
        assert_eq!(roles.resolve("br-lan"), InterfaceRole::Lan);
        assert_eq!(roles.resolve("eth1"), InterfaceRole::Wan);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_LAN_IF, "lan0"),
            (ENV_WAN_IF, " wan0 "),
            (ENV_SOCKET, "/tmp/monitor.sock"),
        ]))
        .unwrap();
        assert_eq!(config.lan_interface, "lan0");
        assert_eq!(config.wan_interface, "wan0");
        assert_eq!(config.control_socket, PathBuf::from("/tmp/monitor.sock"));
        assert_eq!(config.log_config, PathBuf::from(DEFAULT_LOG_CONFIG));
    }

    #[test]
    fn test_blank_value_takes_default() {
        let config = Config::from_lookup(lookup(&[(ENV_LAN_IF, "   ")])).unwrap();
        assert_eq!(config.lan_interface, DEFAULT_LAN_IF);
    }

    #[test]
    fn test_same_lan_and_wan_rejected() {
        let result = Config::from_lookup(lookup(&[(ENV_LAN_IF, "eth1"), (ENV_WAN_IF, "eth1")]));
        assert!(result.is_err());
    }
}
