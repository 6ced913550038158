//! Watches a gateway's LAN and WAN interfaces for IPv4 address changes and
//! reports when the WAN address falls inside the LAN subnet.

pub mod config;
pub mod daemon;
pub mod logging;
pub mod models;
pub mod netlink;
pub mod output;
pub mod processing;
pub mod publish;

pub use config::Config;
pub use processing::{bootstrap, SubnetTracker};
pub use publish::StatusPublisher;
