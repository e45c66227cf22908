#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub use details::{resolve, EchoReply, PingError, PingResult, ProbeStats, ProbeSummary, ResolvedHost, Ttl};
pub use ping_probe::*;

mod details;
mod ping_probe;
