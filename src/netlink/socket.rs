//! Kernel address-change notifications.
//!
//! A raw `NETLINK_ROUTE` socket subscribed to the IPv4 address multicast
//! group, driven by tokio readiness. Each wakeup performs exactly one receive
//! into an 8 KiB buffer; whatever the kernel could not queue is lost at the
//! socket layer.

use super::decode::{decode_events, RECV_BUFFER_SIZE};
use super::names::InterfaceNames;
use crate::models::AddressEvent;
use netlink_sys::{protocols::NETLINK_ROUTE, Socket, SocketAddr};
use std::error::Error;
use std::io::ErrorKind;
use tokio::io::unix::AsyncFd;

/// RTMGRP_IPV4_IFADDR multicast group bitmask.
const RTMGRP_IPV4_IFADDR: u32 = 0x10;

pub struct NetlinkListener {
    socket: AsyncFd<Socket>,
    buffer: Vec<u8>,
}

impl NetlinkListener {
    /// Open and bind the socket. Must be called inside a tokio runtime.
    pub fn bind() -> Result<Self, Box<dyn Error>> {
        let mut socket = Socket::new(NETLINK_ROUTE)
            .map_err(|e| format!("Failed to create netlink socket: {e}"))?;

        // The groups field is a bitmask, not a group id.
        let addr = SocketAddr::new(0, RTMGRP_IPV4_IFADDR);
        socket
            .bind(&addr)
            .map_err(|e| format!("Failed to bind netlink socket: {e}"))?;
        socket
            .set_non_blocking(true)
            .map_err(|e| format!("Failed to set netlink socket non-blocking: {e}"))?;

        let socket =
            AsyncFd::new(socket).map_err(|e| format!("Failed to register netlink socket: {e}"))?;
        log::info!(
            "Subscribed to IPv4 address events (groups=0x{:08x})",
            RTMGRP_IPV4_IFADDR
        );

        Ok(Self {
            socket,
            buffer: Vec::with_capacity(RECV_BUFFER_SIZE),
        })
    }

    /// Wait for readiness, read once, and decode what arrived.
    ///
    /// An empty read or a spurious wakeup yields no events. Only a failed
    /// poll of the descriptor is an error.
    pub async fn next_events(
        &mut self,
        names: &dyn InterfaceNames,
    ) -> Result<Vec<AddressEvent>, Box<dyn Error>> {
        let mut guard = self
            .socket
            .readable()
            .await
            .map_err(|e| format!("Netlink socket poll failed: {e}"))?;

        self.buffer.clear();
        let buffer = &mut self.buffer;
        let n = match guard.try_io(|inner| inner.get_ref().recv(buffer, 0)) {
            Ok(Ok(n)) => n,
            Ok(Err(e)) if e.kind() == ErrorKind::WouldBlock => 0,
            Ok(Err(e)) => {
                // ENOBUFS and friends: the kernel dropped messages, keep going.
                log::warn!("Netlink receive failed: {e}");
                0
            }
            Err(_would_block) => 0,
        };
        if n == 0 {
            return Ok(Vec::new());
        }

        log::trace!("Received {n} bytes of netlink data");
        Ok(decode_events(&self.buffer[..n], names))
    }
}
