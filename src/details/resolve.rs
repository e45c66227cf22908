use crate::details::{PingError, PingResult};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, ToSocketAddrs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedHost {
    pub addr: Ipv4Addr,
    /// `false` when the host was given as an IPv4 literal.
    pub is_domain: bool,
}

/// Resolves a host name or IPv4 literal. Only IPv4 targets are supported.
pub fn resolve(host: &str) -> PingResult<ResolvedHost> {
    let resolution_error = |source: io::Error| PingError::Resolution { host: host.to_string(), source };

    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Ok(ResolvedHost { addr, is_domain: false });
    }
    if host.is_empty() {
        return Err(resolution_error(io::Error::new(io::ErrorKind::InvalidInput, "empty host")));
    }
    if host.parse::<Ipv6Addr>().is_ok() {
        return Err(resolution_error(io::Error::new(io::ErrorKind::Unsupported, "IPv6 is not supported")));
    }

    tracing::trace!("resolving {}", host);
    let addr = (host, 0)
        .to_socket_addrs()
        .map_err(resolution_error)?
        .find_map(|socket_addr| match socket_addr.ip() {
            IpAddr::V4(addr) => Some(addr),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| {
            resolution_error(io::Error::new(io::ErrorKind::AddrNotAvailable, "no IPv4 address found"))
        })?;
    tracing::trace!("resolved {} to {}", host, addr);

    Ok(ResolvedHost { addr, is_domain: true })
}
