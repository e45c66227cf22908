use crate::details::icmp::v4::{RawSocket, TSocket};
use crate::details::probe_loop::run_probe_loop;
use crate::{resolve, PingError, PingResult, ProbeStats, ResolvedHost};
use std::io::Write;
use std::time::Duration;

pub const DEFAULT_COUNT: u32 = 4;
pub const DEFAULT_PAYLOAD_SIZE: usize = 6;
pub const DEFAULT_TIMEOUT_MS: u64 = 1500;

// 65535-byte IPv4 datagram minus IPv4 and ICMP headers.
pub const MAX_PAYLOAD_SIZE: usize = 65507;

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct PingProbeConfig {
    /// Host name or IPv4 address.
    pub host: String,
    pub count: u32,
    pub payload_size: usize,
    /// Bounds the connect and each single echo exchange.
    pub timeout: Duration,
    /// ICMP identifier shared by every request of the run.
    pub identifier: u16,
}

impl PingProbeConfig {
    pub fn new(host: impl Into<String>) -> Self {
        PingProbeConfig {
            host: host.into(),
            count: DEFAULT_COUNT,
            payload_size: DEFAULT_PAYLOAD_SIZE,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            identifier: rand::random::<u16>(),
        }
    }

    pub fn validate(&self) -> PingResult<()> {
        if self.host.is_empty() {
            return Err(PingError::InvalidConfig("a target host or IP address is required".to_owned()));
        }
        if self.count == 0 {
            return Err(PingError::InvalidConfig("count must be at least 1".to_owned()));
        }
        if self.payload_size > MAX_PAYLOAD_SIZE {
            return Err(PingError::InvalidConfig(format!(
                "payload size {} exceeds the maximum of {MAX_PAYLOAD_SIZE} bytes",
                self.payload_size
            )));
        }
        if self.timeout.is_zero() {
            return Err(PingError::InvalidConfig("timeout must be greater than zero".to_owned()));
        }
        Ok(())
    }
}

/// Pings `config.host` over a raw ICMPv4 socket and writes the report to `out`.
///
/// Raw sockets need root or `CAP_NET_RAW`.
pub fn run<W>(config: &PingProbeConfig, out: &mut W) -> PingResult<ProbeStats>
where
    W: Write,
{
    config.validate()?;
    let target = resolve(&config.host)?;
    write_banner(config, &target, out)?;

    let socket = RawSocket::connect(target.addr, config.timeout).map_err(PingError::Connection)?;
    run_with_socket(config, &target, socket, out)
}

fn run_with_socket<S, W>(
    config: &PingProbeConfig,
    target: &ResolvedHost,
    socket: S,
    out: &mut W,
) -> PingResult<ProbeStats>
where
    S: TSocket,
    W: Write,
{
    tracing::trace!("pinging {} with identifier {:#06x}", target.addr, config.identifier);
    run_probe_loop(socket, config, target.addr, out)
}

fn write_banner<W>(config: &PingProbeConfig, target: &ResolvedHost, out: &mut W) -> PingResult<()>
where
    W: Write,
{
    let written = if target.is_domain {
        writeln!(
            out,
            "\nPinging {} [{}] with {} bytes of data:",
            config.host, target.addr, config.payload_size
        )
    } else {
        writeln!(out, "\nPinging {} with {} bytes of data:", target.addr, config.payload_size)
    };
    written.map_err(PingError::Report)
}
