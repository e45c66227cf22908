pub use ping_error::PingError;
pub use ping_result::PingResult;

pub use icmp::v4::Ttl;
pub use probe_stats::{ProbeStats, ProbeSummary};
pub use records::EchoReply;
pub use resolve::{resolve, ResolvedHost};

pub(crate) mod icmp;
mod ping_error;
mod ping_receiver;
mod ping_result;
mod ping_sender;
pub(crate) mod probe_loop;
mod probe_stats;
mod records;
mod resolve;
