use super::icmp_header::{apply_checksum, serialize, IcmpHeader};
use super::SequenceNumber;

/// An echo request reused across probes: only the sequence number and checksum change.
pub(crate) struct IcmpPacket {
    header: IcmpHeader,
    payload: Vec<u8>,
}

impl IcmpPacket {
    pub(crate) fn echo_request(identifier: u16, payload_size: usize) -> Self {
        IcmpPacket { header: IcmpHeader::echo_request(identifier), payload: vec![0u8; payload_size] }
    }

    #[cfg(test)]
    pub(crate) fn header(&self) -> &IcmpHeader {
        &self.header
    }

    pub(crate) fn payload_size(&self) -> usize {
        self.payload.len()
    }

    pub(crate) fn prepare(&mut self, sequence_number: SequenceNumber) {
        self.header.sequence_number = sequence_number.into();
        apply_checksum(&mut self.header, &self.payload);
    }

    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        serialize(&self.header, &self.payload)
    }
}
