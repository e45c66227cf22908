use crate::details::icmp::v4::{IcmpPacket, SequenceNumber, TSocket};
use crate::details::records::PingSendRecord;
use crate::details::{PingError, PingResult};
use std::io;
use std::time::{Duration, Instant};

pub(crate) struct PingSender {
    packet: IcmpPacket,
    timeout: Duration,
}

impl PingSender {
    pub(crate) fn new(packet: IcmpPacket, timeout: Duration) -> Self {
        PingSender { packet, timeout }
    }

    /// Sends one echo request. Any failure to put the whole packet on the wire is fatal.
    pub(crate) fn send_to<S>(
        &mut self,
        socket: &mut S,
        sequence_number: SequenceNumber,
    ) -> PingResult<PingSendRecord>
    where
        S: TSocket,
    {
        self.packet.prepare(sequence_number);
        let bytes = self.packet.to_bytes();

        let send_time = Instant::now();
        if let Err(e) = socket.set_deadline(send_time + self.timeout) {
            tracing::warn!("could not set socket deadline: {}", e);
        }

        let n = socket.write(&bytes).map_err(PingError::Write)?;
        if n != bytes.len() {
            return Err(PingError::Write(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("sent {n} of {} bytes", bytes.len()),
            )));
        }
        tracing::trace!(
            "echo request {} sent ({} payload bytes)",
            sequence_number,
            self.packet.payload_size()
        );

        Ok(PingSendRecord { sequence_number, send_time })
    }
}
