pub(crate) mod echo_reply;
pub(crate) mod icmp_header;
mod icmp_packet;
mod sequence_number;
pub(crate) mod socket;
mod ttl;

pub(crate) use icmp_packet::IcmpPacket;
pub(crate) use sequence_number::SequenceNumber;
pub(crate) use socket::raw_socket::RawSocket;
pub(crate) use socket::TSocket;
pub use ttl::Ttl;

#[cfg(test)]
pub(crate) use socket::tests;
