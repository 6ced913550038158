//! Daemon wiring: control socket, startup scan, netlink event loop.
//!
//! Everything runs on one thread. Each batch of decoded events is applied
//! to the tracker to completion before the next wakeup is polled.

use crate::config::Config;
use crate::netlink::{NetlinkListener, SystemAddresses, SystemInterfaceNames};
use crate::processing::{bootstrap, SubnetTracker};
use crate::publish::{ControlServer, StatusPublisher};
use std::error::Error;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};

/// Run until SIGINT/SIGTERM.
///
/// Errors are setup failures (control socket, netlink socket, signal
/// handlers) or a failed poll of the netlink descriptor.
pub async fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let publisher = Arc::new(StatusPublisher::new());
    let server = ControlServer::bind(&config.control_socket)?;

    let mut tracker = SubnetTracker::new(config.roles()?, Arc::clone(&publisher));
    let summary = bootstrap(&mut tracker, &SystemAddresses);
    log::debug!("Bootstrap summary: {summary:?}");

    let mut listener = NetlinkListener::bind()?;
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| format!("Failed to install SIGTERM handler: {e}"))?;
    let server_task = tokio::spawn(server.serve(Arc::clone(&publisher)));
    let names = SystemInterfaceNames;

    log::info!(
        "Entering main event loop (LAN={}, WAN={})",
        config.lan_interface,
        config.wan_interface
    );
    let result = loop {
        tokio::select! {
            events = listener.next_events(&names) => match events {
                Ok(events) => {
                    for evt in &events {
                        tracker.on_address_event(evt);
                    }
                }
                Err(e) => break Err(e),
            },
            _ = tokio::signal::ctrl_c() => break Ok(()),
            _ = sigterm.recv() => break Ok(()),
        }
    };

    log::info!("Shutting down monitor.");
    server_task.abort();
    // Let the aborted task drop the server so the socket file is removed.
    let _ = server_task.await;
    result
}
