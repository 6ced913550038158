//! Decoding of rtnetlink address notifications into [`AddressEvent`]s.
//!
//! One receive buffer may hold several records. Each record is walked by its
//! own header length; a record that cannot be decoded is skipped without
//! affecting the rest of the buffer.

use super::names::InterfaceNames;
use crate::models::{AddressEvent, EventKind};
use netlink_packet_core::{NetlinkBuffer, NetlinkMessage, NetlinkPayload, NLMSG_DONE};
use netlink_packet_route::address::{AddressAttribute, AddressMessage};
use netlink_packet_route::{AddressFamily, RouteNetlinkMessage};
use std::net::{IpAddr, Ipv4Addr};

/// Receive buffer size for one readiness callback.
pub const RECV_BUFFER_SIZE: usize = 8192;

/// NLMSG_ALIGN
fn align(len: usize) -> usize {
    (len + 3) & !3
}

/// Decode every usable address record in `buf`.
///
/// Stops at `NLMSG_DONE` or at the first truncated header.
pub fn decode_events(buf: &[u8], names: &dyn InterfaceNames) -> Vec<AddressEvent> {
    let mut events = Vec::new();
    let mut offset = 0;

    while offset < buf.len() {
        let bytes = &buf[offset..];
        let nl_buf = match NetlinkBuffer::new_checked(bytes) {
            Ok(nl_buf) => nl_buf,
            Err(e) => {
                log::trace!(
                    "Incomplete netlink record at offset {offset} ({} bytes left): {e:?}",
                    bytes.len()
                );
                break;
            }
        };
        if nl_buf.message_type() == NLMSG_DONE {
            break;
        }
        offset += align(nl_buf.length() as usize);

        let msg = match NetlinkMessage::<RouteNetlinkMessage>::deserialize(bytes) {
            Ok(msg) => msg,
            Err(e) => {
                log::debug!("Dropping undecodable netlink record: {e:?}");
                continue;
            }
        };
        let (kind, addr_msg) = match msg.payload {
            NetlinkPayload::InnerMessage(RouteNetlinkMessage::NewAddress(m)) => (EventKind::Added, m),
            NetlinkPayload::InnerMessage(RouteNetlinkMessage::DelAddress(m)) => {
                (EventKind::Removed, m)
            }
            _ => continue,
        };
        if let Some(event) = address_event(&addr_msg, kind, names) {
            log::trace!("Decoded {event}");
            events.push(event);
        }
    }
    events
}

/// Build an event from one address message, if it is usable.
pub fn address_event(
    msg: &AddressMessage,
    kind: EventKind,
    names: &dyn InterfaceNames,
) -> Option<AddressEvent> {
    if msg.header.family != AddressFamily::Inet {
        return None;
    }
    let address = ipv4_of(msg)?;
    if address.is_unspecified() {
        return None;
    }
    let Some(interface_name) = names.name_of(msg.header.index) else {
        log::debug!("Skipping {address}: unknown interface index {}", msg.header.index);
        return None;
    };

    Some(AddressEvent {
        interface_name,
        address,
        prefix_length: msg.header.prefix_len,
        event_kind: kind,
    })
}

// IFA_LOCAL is the interface's own address; IFA_ADDRESS is the peer on
// point-to-point links and equal to IFA_LOCAL otherwise.
fn ipv4_of(msg: &AddressMessage) -> Option<Ipv4Addr> {
    let mut local = None;
    let mut address = None;
    for attr in &msg.attributes {
        match attr {
            AddressAttribute::Local(IpAddr::V4(ip)) => local = Some(*ip),
            AddressAttribute::Address(IpAddr::V4(ip)) => address = Some(*ip),
            _ => {}
        }
    }
    local.or(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlink::StaticInterfaceNames;

    const RTM_NEWADDR: u16 = 20;
    const RTM_DELADDR: u16 = 21;
    const RTM_NEWLINK: u16 = 16;
    const AF_INET: u8 = 2;
    const AF_INET6: u8 = 10;
    const IFA_ADDRESS: u16 = 1;
    const IFA_LOCAL: u16 = 2;

    fn rtattr(kind: u16, data: &[u8]) -> Vec<u8> {
        let len = 4 + data.len();
        let mut out = Vec::new();
        out.extend_from_slice(&(len as u16).to_ne_bytes());
        out.extend_from_slice(&kind.to_ne_bytes());
        out.extend_from_slice(data);
        out.resize(align(len), 0);
        out
    }

    fn nlmsg(msg_type: u16, payload: &[u8]) -> Vec<u8> {
        let len = 16 + payload.len();
        let mut out = Vec::new();
        out.extend_from_slice(&(len as u32).to_ne_bytes());
        out.extend_from_slice(&msg_type.to_ne_bytes());
        out.extend_from_slice(&0u16.to_ne_bytes()); // flags
        out.extend_from_slice(&0u32.to_ne_bytes()); // seq
        out.extend_from_slice(&0u32.to_ne_bytes()); // pid
        out.extend_from_slice(payload);
        out.resize(align(len), 0);
        out
    }

    fn ifaddr(msg_type: u16, family: u8, index: u32, prefix: u8, attrs: &[Vec<u8>]) -> Vec<u8> {
        let mut payload = vec![family, prefix, 0, 0];
        payload.extend_from_slice(&index.to_ne_bytes());
        for a in attrs {
            payload.extend_from_slice(a);
        }
        nlmsg(msg_type, &payload)
    }

    fn new_v4(index: u32, ip: [u8; 4], prefix: u8) -> Vec<u8> {
        ifaddr(
            RTM_NEWADDR,
            AF_INET,
            index,
            prefix,
            &[rtattr(IFA_ADDRESS, &ip), rtattr(IFA_LOCAL, &ip)],
        )
    }

    fn names() -> StaticInterfaceNames {
        StaticInterfaceNames::new(&[(1, "lo"), (3, "eth1"), (7, "br-lan")])
    }

    #[test]
    fn test_decode_single_new_address() {
        let buf = new_v4(7, [192, 168, 1, 1], 24);
        let events = decode_events(&buf, &names());
        assert_eq!(
            events,
            vec![AddressEvent::added("br-lan", Ipv4Addr::new(192, 168, 1, 1), 24)]
        );
    }

    #[test]
    fn test_decode_multiple_records() {
        let mut buf = new_v4(7, [192, 168, 1, 1], 24);
        buf.extend(ifaddr(
            RTM_DELADDR,
            AF_INET,
            3,
            24,
            &[rtattr(IFA_LOCAL, &[10, 0, 0, 5])],
        ));
        buf.extend(new_v4(3, [192, 168, 1, 50], 24));

        let events = decode_events(&buf, &names());
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].event_kind, EventKind::Removed);
        assert_eq!(events[1].address, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(events[2].interface_name, "eth1");
    }

    #[test]
    fn test_decode_prefers_local_over_peer() {
        let buf = ifaddr(
            RTM_NEWADDR,
            AF_INET,
            3,
            32,
            &[
                rtattr(IFA_ADDRESS, &[100, 64, 0, 1]),
                rtattr(IFA_LOCAL, &[100, 64, 0, 2]),
            ],
        );
        let events = decode_events(&buf, &names());
        assert_eq!(events[0].address, Ipv4Addr::new(100, 64, 0, 2));
    }

    #[test]
    fn test_decode_stops_at_done() {
        let mut buf = nlmsg(NLMSG_DONE, &[0, 0, 0, 0]);
        buf.extend(new_v4(7, [192, 168, 1, 1], 24));
        assert!(decode_events(&buf, &names()).is_empty());
    }

    #[test]
    fn test_decode_skips_unusable_records() {
        // unknown index, IPv6 family, no address, other message type
        let mut buf = new_v4(42, [192, 168, 1, 1], 24);
        buf.extend(ifaddr(RTM_NEWADDR, AF_INET6, 7, 64, &[]));
        buf.extend(ifaddr(RTM_NEWADDR, AF_INET, 7, 24, &[]));
        buf.extend(nlmsg(RTM_NEWLINK, &[0u8; 16]));
        buf.extend(new_v4(3, [10, 0, 0, 5], 24));

        let events = decode_events(&buf, &names());
        assert_eq!(
            events,
            vec![AddressEvent::added("eth1", Ipv4Addr::new(10, 0, 0, 5), 24)]
        );
    }

    #[test]
    fn test_decode_truncated_tail() {
        let mut buf = new_v4(7, [192, 168, 1, 1], 24);
        let second = new_v4(3, [10, 0, 0, 5], 24);
        buf.extend_from_slice(&second[..10]);
        let events = decode_events(&buf, &names());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_decode_empty_buffer() {
        assert!(decode_events(&[], &names()).is_empty());
    }
}
