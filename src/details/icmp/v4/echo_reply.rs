use super::icmp_header::{ECHO_REPLY, ICMP_HEADER_LEN};
use super::{SequenceNumber, Ttl};
use pnet_packet::icmp::echo_reply::EchoReplyPacket;
use pnet_packet::ipv4::Ipv4Packet;

pub(crate) const IPV4_HEADER_LEN: usize = 20;

/// Fields of a raw-socket capture (IPv4 header followed by ICMP) needed to report a probe.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawReply {
    pub icmp_type: u8,
    pub identifier: u16,
    pub sequence_number: SequenceNumber,
    pub ttl: Ttl,
    pub byte_count: usize,
}

impl RawReply {
    pub(crate) fn answers(&self, identifier: u16, sequence_number: SequenceNumber) -> bool {
        self.icmp_type == ECHO_REPLY
            && self.identifier == identifier
            && self.sequence_number == sequence_number
    }
}

/// Returns `None` if the capture is too short to hold an IPv4 header and an ICMP echo header.
pub(crate) fn parse(capture: &[u8]) -> Option<RawReply> {
    let ipv4_packet = Ipv4Packet::new(capture)?;
    let header_len = usize::from(ipv4_packet.get_header_length()) * 4;
    if header_len < IPV4_HEADER_LEN || capture.len() < header_len + ICMP_HEADER_LEN {
        return None;
    }
    let echo = EchoReplyPacket::new(&capture[header_len..])?;

    Some(RawReply {
        icmp_type: echo.get_icmp_type().0,
        identifier: echo.get_identifier(),
        sequence_number: echo.get_sequence_number().into(),
        // TTL sits at byte offset 8 of the IPv4 header.
        ttl: ipv4_packet.get_ttl().into(),
        byte_count: capture.len().saturating_sub(IPV4_HEADER_LEN + ICMP_HEADER_LEN),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::details::icmp::v4::icmp_header::{apply_checksum, serialize, IcmpHeader, ECHO_REQUEST};
    use pnet_packet::ip::IpNextHeaderProtocols;
    use pnet_packet::ipv4::MutableIpv4Packet;
    use pnet_packet::Packet;
    use std::net::Ipv4Addr;

    pub(crate) fn ipv4_capture(source: Ipv4Addr, ttl: u8, icmp: &[u8]) -> Vec<u8> {
        let total_len = IPV4_HEADER_LEN + icmp.len();
        let mut ip = MutableIpv4Packet::owned(vec![0u8; total_len]).unwrap();
        ip.set_version(4);
        ip.set_header_length(5);
        ip.set_total_length(u16::try_from(total_len).unwrap());
        ip.set_ttl(ttl);
        ip.set_next_level_protocol(IpNextHeaderProtocols::Icmp);
        ip.set_source(source);
        ip.set_destination(Ipv4Addr::LOCALHOST);
        ip.set_payload(icmp);
        ip.packet().to_vec()
    }

    pub(crate) fn echo_bytes(
        icmp_type: u8,
        identifier: u16,
        sequence_number: u16,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut header = IcmpHeader { icmp_type, code: 0, checksum: 0, identifier, sequence_number };
        apply_checksum(&mut header, payload);
        serialize(&header, payload)
    }

    #[test]
    fn parse_reads_ttl_and_byte_count() {
        let capture = ipv4_capture(Ipv4Addr::LOCALHOST, 57, &echo_bytes(ECHO_REPLY, 9, 3, &[0u8; 6]));
        let reply = parse(&capture).unwrap();

        assert_eq!(Ttl(57), reply.ttl);
        assert_eq!(capture[8], u8::from(reply.ttl));
        assert_eq!(6, reply.byte_count);
        assert_eq!(capture.len() - 28, reply.byte_count);
        assert_eq!(9, reply.identifier);
        assert_eq!(SequenceNumber::from(3), reply.sequence_number);
    }

    #[test]
    fn answers_only_matching_echo_reply() {
        let capture = ipv4_capture(Ipv4Addr::LOCALHOST, 64, &echo_bytes(ECHO_REPLY, 9, 3, &[]));
        let reply = parse(&capture).unwrap();

        assert!(reply.answers(9, SequenceNumber::from(3)));
        assert!(!reply.answers(10, SequenceNumber::from(3)));
        assert!(!reply.answers(9, SequenceNumber::from(4)));
    }

    #[test]
    fn own_echo_request_is_not_an_answer() {
        let capture = ipv4_capture(Ipv4Addr::LOCALHOST, 64, &echo_bytes(ECHO_REQUEST, 9, 3, &[]));
        let reply = parse(&capture).unwrap();

        assert!(!reply.answers(9, SequenceNumber::from(3)));
    }

    #[test]
    fn truncated_capture_is_rejected() {
        let capture = ipv4_capture(Ipv4Addr::LOCALHOST, 64, &echo_bytes(ECHO_REPLY, 9, 3, &[]));
        assert!(parse(&capture[..IPV4_HEADER_LEN + 4]).is_none());
        assert!(parse(&capture[..10]).is_none());
        assert!(parse(&[]).is_none());
    }
}
