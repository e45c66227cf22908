use std::io;
use std::time::Instant;

pub(crate) mod raw_socket;

/// A connection to one target. Dropping it closes the connection.
pub(crate) trait TSocket {
    /// Bounds every following `write` and `read` until the next call.
    fn set_deadline(&mut self, deadline: Instant) -> io::Result<()>;
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}
