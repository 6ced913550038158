//! Conflict status publishing.
//!
//! - [`status`] - the single-slot status store with update fan-out
//! - [`control`] - the `network.conflict` object on a Unix socket
//! - [`client`] - helpers for querying that object

mod client;
mod control;
mod status;

pub use client::{listen, query_status};
pub use control::{respond, ControlServer, Request, Response, OBJECT_NAME};
pub use status::StatusPublisher;
