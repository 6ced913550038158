//! Address tracking and conflict detection.
//!
//! - [`tracker`] - the LAN/WAN subnet state machine
//! - [`bootstrap`] - the one-shot startup scan that seeds it

mod bootstrap;
mod tracker;

// Re-export public functions
pub use bootstrap::{bootstrap, BootstrapSummary};
pub use tracker::{is_conflict, SubnetState, SubnetTracker};
