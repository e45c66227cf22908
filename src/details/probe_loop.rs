use crate::details::icmp::v4::{IcmpPacket, SequenceNumber, TSocket};
use crate::details::ping_receiver::PingReceiver;
use crate::details::ping_sender::PingSender;
use crate::details::probe_stats::ProbeStats;
use crate::details::{PingError, PingResult};
use crate::PingProbeConfig;
use std::io::Write;
use std::net::Ipv4Addr;

/// Sends `config.count` echo requests one after another and reports each outcome to `out`.
///
/// A lost or unreadable reply only costs its probe. A failed write aborts the run before the
/// summary is written. The socket is owned here and closed on every return path.
pub(crate) fn run_probe_loop<S, W>(
    mut socket: S,
    config: &PingProbeConfig,
    target: Ipv4Addr,
    out: &mut W,
) -> PingResult<ProbeStats>
where
    S: TSocket,
    W: Write,
{
    let packet = IcmpPacket::echo_request(config.identifier, config.payload_size);
    let mut ping_sender = PingSender::new(packet, config.timeout);
    let mut ping_receiver = PingReceiver::new(config.identifier, target);
    let mut stats = ProbeStats::default();

    let mut sequence_number = SequenceNumber::start_value();
    for _ in 0..config.count {
        let record = ping_sender.send_to(&mut socket, sequence_number)?;
        stats.record_sent();

        match ping_receiver.receive(&mut socket, &record) {
            Ok(reply) => {
                stats.record_reply(reply.elapsed_ms);
                writeln!(out, "{reply}").map_err(PingError::Report)?;
            }
            Err(e) if e.is_recoverable() => {
                writeln!(out, "{e}").map_err(PingError::Report)?;
            }
            Err(e) => return Err(e),
        }
        sequence_number = sequence_number.next();
    }

    write!(out, "{}", stats.summary(target)).map_err(PingError::Report)?;
    tracing::trace!("probe loop finished: {} sent, {} received", stats.sent(), stats.received());
    Ok(stats)
}
