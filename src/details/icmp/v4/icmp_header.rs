use crate::details::icmp::v4::SequenceNumber;

pub(crate) const ICMP_HEADER_LEN: usize = 8;

pub(crate) const ECHO_REQUEST: u8 = 8;
pub(crate) const ECHO_REPLY: u8 = 0;

/// ICMP echo header. Fields are kept in host order and packed big-endian by `serialize`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct IcmpHeader {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
    pub identifier: u16,
    pub sequence_number: u16,
}

impl IcmpHeader {
    pub(crate) fn echo_request(identifier: u16) -> Self {
        IcmpHeader {
            icmp_type: ECHO_REQUEST,
            code: 0,
            checksum: 0,
            identifier,
            sequence_number: SequenceNumber::start_value().into(),
        }
    }
}

pub(crate) fn serialize(header: &IcmpHeader, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(ICMP_HEADER_LEN + payload.len());
    bytes.push(header.icmp_type);
    bytes.push(header.code);
    bytes.extend_from_slice(&header.checksum.to_be_bytes());
    bytes.extend_from_slice(&header.identifier.to_be_bytes());
    bytes.extend_from_slice(&header.sequence_number.to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Internet checksum (RFC 1071) over header and payload. The checksum field is zeroed first.
pub(crate) fn compute_checksum(header: &mut IcmpHeader, payload: &[u8]) -> u16 {
    header.checksum = 0;
    let bytes = serialize(header, payload);

    let words = bytes.chunks_exact(2);
    // An odd trailing byte is the high byte of a zero-padded word.
    let trailing = words.remainder().first().map_or(0, |high| u32::from(*high) << 8);
    let mut sum = words
        .map(|word| u32::from(u16::from_be_bytes([word[0], word[1]])))
        .fold(trailing, u32::wrapping_add);
    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xFFFF);
    }

    #[allow(clippy::cast_possible_truncation)]
    let folded = sum as u16;
    !folded
}

pub(crate) fn apply_checksum(header: &mut IcmpHeader, payload: &[u8]) {
    header.checksum = compute_checksum(header, payload);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet_packet::icmp::{checksum, IcmpPacket};

    fn fixture_header() -> IcmpHeader {
        IcmpHeader { icmp_type: 8, code: 0, checksum: 0, identifier: 1, sequence_number: 1 }
    }

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn serialize_fixture() {
        let header = fixture_header();
        assert_eq!("0800000000010001", to_hex(&serialize(&header, &[])));
    }

    #[test]
    fn checksum_fixture() {
        let mut header = fixture_header();
        assert_eq!(63485, compute_checksum(&mut header, &[]));
        assert_eq!(0xF7FD, compute_checksum(&mut header, &[]));
    }

    #[test]
    fn odd_trailing_byte_is_high_byte() {
        // 0x0802 (fixture header words) + 0xAB00, complemented
        let mut header = fixture_header();
        assert_eq!(0x4CFD, compute_checksum(&mut header, &[0xAB]));
    }

    #[test]
    fn apply_checksum_stores_value_in_header() {
        let mut header = fixture_header();
        apply_checksum(&mut header, &[]);
        assert_eq!(0xF7FD, header.checksum);
        assert_eq!("0800f7fd00010001", to_hex(&serialize(&header, &[])));
    }

    #[test]
    fn checksum_is_idempotent() {
        let payload = [0xde, 0xad, 0xbe, 0xef, 0x01];
        let mut header = IcmpHeader::echo_request(0x1234);
        apply_checksum(&mut header, &payload);
        let first = header.checksum;
        apply_checksum(&mut header, &payload);
        assert_eq!(first, header.checksum);
    }

    #[test]
    fn serialized_length_is_header_plus_payload() {
        let header = IcmpHeader::echo_request(7);
        for len in [0usize, 1, 6, 7, 56, 1472] {
            assert_eq!(ICMP_HEADER_LEN + len, serialize(&header, &vec![0u8; len]).len());
        }
    }

    #[test]
    fn payload_is_copied_verbatim() {
        let header = IcmpHeader::echo_request(7);
        let payload = [1u8, 2, 3];
        assert_eq!(&payload[..], &serialize(&header, &payload)[ICMP_HEADER_LEN..]);
    }

    #[test]
    fn checksum_matches_pnet_for_even_and_odd_payloads() {
        for len in [0usize, 1, 6, 7, 64, 65] {
            let payload: Vec<u8> = (0..len).map(|i| (i * 37 % 251) as u8).collect();
            let mut header = IcmpHeader::echo_request(0xBEEF);
            header.sequence_number = 42;
            apply_checksum(&mut header, &payload);

            let bytes = serialize(&header, &payload);
            let expected = checksum(&IcmpPacket::new(&bytes).unwrap());
            assert_eq!(expected, header.checksum, "payload length {len}");
        }
    }

    #[test]
    fn verifying_a_checksummed_packet_yields_zero() {
        let payload = [0u8; 6];
        let mut header = IcmpHeader::echo_request(99);
        apply_checksum(&mut header, &payload);
        let bytes = serialize(&header, &payload);

        let mut sum: u32 = bytes.chunks(2).map(|w| u32::from(u16::from_be_bytes([w[0], w[1]]))).sum();
        while sum >> 16 != 0 {
            sum = (sum >> 16) + (sum & 0xFFFF);
        }
        assert_eq!(0xFFFF, sum);
    }

    #[test]
    fn single_bit_flips_change_checksum() {
        let payload = [0x10u8, 0x20, 0x30, 0x40, 0x50, 0x60];
        let mut header = IcmpHeader::echo_request(0x0102);
        let original = compute_checksum(&mut header, &payload);

        for bit in 0..16 {
            let mut flipped = header;
            flipped.identifier ^= 1 << bit;
            assert_ne!(original, compute_checksum(&mut flipped, &payload), "identifier bit {bit}");

            let mut flipped = header;
            flipped.sequence_number ^= 1 << bit;
            assert_ne!(original, compute_checksum(&mut flipped, &payload), "sequence bit {bit}");
        }
        for byte in 0..payload.len() {
            for bit in 0..8 {
                let mut mutated = payload;
                mutated[byte] ^= 1 << bit;
                let mut header = header;
                let flipped = compute_checksum(&mut header, &mutated);
                assert_ne!(original, flipped, "payload byte {byte} bit {bit}");
            }
        }
    }
}
