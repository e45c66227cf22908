use crate::details::icmp::v4::{SequenceNumber, Ttl};
use std::fmt;
use std::net::Ipv4Addr;
use std::time::Instant;

pub(crate) struct PingSendRecord {
    pub sequence_number: SequenceNumber,
    pub send_time: Instant,
}

/// One answered probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EchoReply {
    pub source: Ipv4Addr,
    /// ICMP payload bytes: the captured datagram minus the IPv4 and ICMP headers.
    pub byte_count: usize,
    pub ttl: Ttl,
    pub sequence_number: u16,
    pub elapsed_ms: u64,
}

impl fmt::Display for EchoReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reply from {}: bytes={} time={}ms TTL={}",
            self.source, self.byte_count, self.elapsed_ms, self.ttl
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_echo_reply() {
        let reply = EchoReply {
            source: Ipv4Addr::new(10, 0, 0, 1),
            byte_count: 6,
            ttl: Ttl(57),
            sequence_number: 1,
            elapsed_ms: 12,
        };
        assert_eq!("Reply from 10.0.0.1: bytes=6 time=12ms TTL=57", format!("{reply}"));
    }
}
