use crate::details::icmp::v4::echo_reply;
use crate::details::icmp::v4::TSocket;
use crate::details::records::{EchoReply, PingSendRecord};
use crate::details::{PingError, PingResult};
use std::io;
use std::net::Ipv4Addr;

// Large enough for any IPv4 datagram, so replies are never truncated.
const RECEIVE_BUFFER_SIZE: usize = 65535;

pub(crate) struct PingReceiver {
    identifier: u16,
    source: Ipv4Addr,
    buf: Vec<u8>,
}

impl PingReceiver {
    pub(crate) fn new(identifier: u16, source: Ipv4Addr) -> Self {
        PingReceiver { identifier, source, buf: vec![0u8; RECEIVE_BUFFER_SIZE] }
    }

    /// Waits for the reply to `record` until the socket deadline expires.
    ///
    /// Only `PingError::ReplyTimeout` and `PingError::Read` are returned. Datagrams that do not
    /// answer this request are skipped.
    pub(crate) fn receive<S>(&mut self, socket: &mut S, record: &PingSendRecord) -> PingResult<EchoReply>
    where
        S: TSocket,
    {
        loop {
            let n = match socket.read(&mut self.buf) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                    tracing::trace!("echo request {} timed out", record.sequence_number);
                    return Err(PingError::ReplyTimeout);
                }
                Err(e) => return Err(PingError::Read(e)),
            };
            let elapsed = record.send_time.elapsed();

            match echo_reply::parse(&self.buf[..n]) {
                Some(reply) if reply.answers(self.identifier, record.sequence_number) => {
                    tracing::trace!("echo reply {} received", record.sequence_number);
                    return Ok(EchoReply {
                        source: self.source,
                        byte_count: reply.byte_count,
                        ttl: reply.ttl,
                        sequence_number: reply.sequence_number.into(),
                        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    });
                }
                Some(other) => {
                    tracing::debug!(
                        "skipping ICMP type {} id {} seq {}",
                        other.icmp_type,
                        other.identifier,
                        other.sequence_number
                    );
                }
                None => tracing::debug!("skipping malformed datagram of {} bytes", n),
            }
        }
    }
}
