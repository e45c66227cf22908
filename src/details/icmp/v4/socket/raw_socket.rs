use super::TSocket;
use socket2::{Domain, Protocol, SockAddr, Type};
use std::io::{self, Read, Write};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

/// Raw ICMPv4 socket connected to a single target. Needs root or `CAP_NET_RAW`.
///
/// Reads return the whole IPv4 datagram, header included. The descriptor is closed on drop.
pub(crate) struct RawSocket {
    socket: socket2::Socket,
    deadline: Option<Instant>,
}

impl RawSocket {
    pub(crate) fn connect(addr: Ipv4Addr, timeout: Duration) -> Result<Self, io::Error> {
        tracing::trace!("creating RawSocket");
        let socket = socket2::Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
        let target: SockAddr = SocketAddr::new(IpAddr::V4(addr), 0).into();
        // Connecting lets the kernel drop datagrams from other sources.
        socket.connect_timeout(&target, timeout)?;
        Ok(RawSocket { socket, deadline: None })
    }

    fn remaining(&self) -> io::Result<Option<Duration>> {
        remaining_until(self.deadline, Instant::now())
    }
}

// Socket timeouts have microsecond resolution and a zero timeout blocks forever,
// so anything below one microsecond counts as expired.
const MIN_SOCKET_TIMEOUT: Duration = Duration::from_micros(1);

fn remaining_until(deadline: Option<Instant>, now: Instant) -> io::Result<Option<Duration>> {
    match deadline {
        None => Ok(None),
        Some(deadline) => {
            let remaining = deadline.saturating_duration_since(now);
            if remaining < MIN_SOCKET_TIMEOUT {
                Err(io::Error::new(io::ErrorKind::TimedOut, "deadline exceeded"))
            } else {
                Ok(Some(remaining))
            }
        }
    }
}

impl TSocket for RawSocket {
    fn set_deadline(&mut self, deadline: Instant) -> io::Result<()> {
        self.deadline = Some(deadline);
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let remaining = self.remaining()?;
        self.socket.set_write_timeout(remaining)?;
        self.socket.write(buf)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining()?;
        self.socket.set_read_timeout(remaining)?;
        self.socket.read(buf)
    }
}

impl Drop for RawSocket {
    fn drop(&mut self) {
        tracing::trace!("closing RawSocket");
    }
}
