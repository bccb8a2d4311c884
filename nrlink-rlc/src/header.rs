//! UM data PDU header codec.
//!
//! Wire layout, most significant bit first:
//!
//! ```text
//!  byte 0: | 0 0 0 | FI (2) | E (1) | SN[9:8] |
//!  byte 1: |              SN[7:0]             |
//!  then, if E = 1, a chain of (E, LI) groups of 1 + 11 bits each,
//!  zero-padded to the next byte boundary.
//! ```
//!
//! Each length indicator gives the byte length of one non-final data field;
//! the final field always runs to the end of the PDU and carries no LI. The
//! E bit preceding each LI says whether another group follows.

use bytes::{BufMut, BytesMut};
use nrlink_common::{BitReader, BitWriter};
use thiserror::Error;

use crate::sequence_number::SequenceNumber10;

/// Largest value representable in an 11-bit length indicator.
pub const MAX_LENGTH_INDICATOR: u16 = 2047;

/// Fixed part of the UM header, in bytes.
pub const FIXED_HEADER_SIZE: usize = 2;

/// Errors raised when decoding a UM PDU header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlcCodecError {
    #[error("pdu too short for fixed header: {0} bytes")]
    TooShort(usize),

    #[error("length indicator chain runs past the end of the pdu")]
    TruncatedLiChain,
}

/// The two framing-info bits: whether the data field starts, respectively
/// ends, on an SDU boundary. The on-wire bit is 0 when the boundary holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramingInfo {
    pub first_byte_starts_sdu: bool,
    pub last_byte_ends_sdu: bool,
}

impl FramingInfo {
    pub fn new(first_byte_starts_sdu: bool, last_byte_ends_sdu: bool) -> Self {
        Self {
            first_byte_starts_sdu,
            last_byte_ends_sdu,
        }
    }

    fn to_bits(self) -> u8 {
        (u8::from(!self.first_byte_starts_sdu) << 1) | u8::from(!self.last_byte_ends_sdu)
    }

    fn from_bits(bits: u8) -> Self {
        Self {
            first_byte_starts_sdu: bits & 0b10 == 0,
            last_byte_ends_sdu: bits & 0b01 == 0,
        }
    }
}

/// Decoded UM data PDU header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UmHeader {
    pub framing_info: FramingInfo,
    pub sequence_number: SequenceNumber10,
    pub length_indicators: Vec<u16>,
}

impl UmHeader {
    /// Serialized size in bytes, including LI padding.
    pub fn serialized_size(&self) -> usize {
        FIXED_HEADER_SIZE + (self.length_indicators.len() * 12).div_ceil(8)
    }

    /// Appends the encoded header to `buf`.
    pub fn encode(&self, buf: &mut BytesMut) {
        let has_li = !self.length_indicators.is_empty();
        let sn = self.sequence_number.value();
        buf.put_u8(
            (self.framing_info.to_bits() << 3) | (u8::from(has_li) << 2) | ((sn >> 8) as u8),
        );
        buf.put_u8((sn & 0xff) as u8);

        if has_li {
            let mut w = BitWriter::new();
            let n = self.length_indicators.len();
            for (i, &li) in self.length_indicators.iter().enumerate() {
                debug_assert!(li <= MAX_LENGTH_INDICATOR);
                w.write_bit(i + 1 < n);
                w.write_bits(u32::from(li), 11);
            }
            w.align_to_byte();
            buf.put_slice(&w.into_bytes());
        }
    }

    /// Decodes a header from the start of `data`.
    ///
    /// Returns the header and the number of bytes it occupies.
    pub fn decode(data: &[u8]) -> Result<(UmHeader, usize), RlcCodecError> {
        if data.len() < FIXED_HEADER_SIZE {
            return Err(RlcCodecError::TooShort(data.len()));
        }
        let framing_info = FramingInfo::from_bits((data[0] >> 3) & 0b11);
        let mut more = (data[0] >> 2) & 1 == 1;
        let sequence_number =
            SequenceNumber10::new((u16::from(data[0] & 0b11) << 8) | u16::from(data[1]));

        let mut length_indicators = Vec::new();
        let mut reader = BitReader::new(&data[FIXED_HEADER_SIZE..]);
        while more {
            if reader.remaining_bits() < 12 {
                return Err(RlcCodecError::TruncatedLiChain);
            }
            more = reader.read_bit();
            length_indicators.push(reader.read_bits(11) as u16);
        }
        let ext_size = reader.current_index().div_ceil(8);

        Ok((
            UmHeader {
                framing_info,
                sequence_number,
                length_indicators,
            },
            FIXED_HEADER_SIZE + ext_size,
        ))
    }
}
