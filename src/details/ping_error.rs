use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum PingError {
    InvalidConfig(String),
    Resolution { host: String, source: io::Error },
    Connection(io::Error),
    Write(io::Error),
    ReplyTimeout,
    Read(io::Error),
    Report(io::Error),
}

impl PingError {
    /// Recoverable errors cost one probe; everything else ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PingError::ReplyTimeout | PingError::Read(_))
    }
}

impl fmt::Display for PingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            PingError::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
            PingError::Resolution { host, source } => write!(f, "could not resolve host {host}: {source}"),
            PingError::Connection(e) => write!(f, "could not connect: {e}"),
            PingError::Write(e) => write!(f, "could not send echo request: {e}"),
            PingError::ReplyTimeout => write!(f, "Request timed out."),
            PingError::Read(e) => write!(f, "Reply read failed: {e}"),
            PingError::Report(e) => write!(f, "could not write report: {e}"),
        }
    }
}

impl Error for PingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PingError::Resolution { source: e, .. }
            | PingError::Connection(e)
            | PingError::Write(e)
            | PingError::Read(e)
            | PingError::Report(e) => Some(e),
            PingError::InvalidConfig(_) | PingError::ReplyTimeout => None,
        }
    }
}
