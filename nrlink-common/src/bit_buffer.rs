//! Bit-level buffers for ASN.1-style encoding.
//!
//! This module provides `BitWriter` and `BitReader` for writing and reading
//! values at bit granularity. Bits are written and read in MSB-first order
//! within each byte, the convention used by PER-like RRC encodings.

/// A growable bit-level write buffer.
///
/// Values are appended MSB-first. The backing storage grows a byte at a
/// time as bits spill past the current octet boundary.
///
/// # Example
/// ```
/// use nrlink_common::BitWriter;
///
/// let mut w = BitWriter::new();
/// w.write_bits(0b1010, 4);
/// w.write_bits(0b1100, 4);
/// assert_eq!(w.into_bytes(), vec![0b1010_1100]);
/// ```
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Creates an empty `BitWriter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bits written so far.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Writes a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        let octet_index = self.bit_len / 8;
        let bit_index = self.bit_len % 8;
        if octet_index == self.data.len() {
            self.data.push(0);
        }
        if bit {
            self.data[octet_index] |= 1 << (7 - bit_index);
        }
        self.bit_len += 1;
    }

    /// Writes the low `len` bits of `value`, MSB-first.
    ///
    /// # Panics
    /// Panics if `len` > 32.
    #[inline]
    pub fn write_bits(&mut self, value: u32, len: usize) {
        assert!(len <= 32, "len must be <= 32");
        for i in 0..len {
            self.write_bit(((value >> (len - 1 - i)) & 1) != 0);
        }
    }

    /// Writes the low `len` bits of a 64-bit `value`, MSB-first.
    ///
    /// # Panics
    /// Panics if `len` > 64.
    #[inline]
    pub fn write_bits_long(&mut self, value: u64, len: usize) {
        assert!(len <= 64, "len must be <= 64");
        for i in 0..len {
            self.write_bit(((value >> (len - 1 - i)) & 1) != 0);
        }
    }

    /// Pads with zero bits up to the next octet boundary.
    #[inline]
    pub fn align_to_byte(&mut self) {
        let remainder = self.bit_len % 8;
        if remainder != 0 {
            self.write_bits(0, 8 - remainder);
        }
    }

    /// Consumes the writer, returning the written bytes.
    ///
    /// A trailing partial octet is zero-padded.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// A bit-level read cursor over a byte slice.
///
/// Bits are consumed MSB-first. Reading past the end of the buffer is a
/// programming error on the decode path (the encoder and decoder are
/// hand-paired) and panics.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    index: usize, // bit index
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, index: 0 }
    }

    /// Returns the current bit index.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Returns the number of unread bits.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.index
    }

    /// Reads a single bit.
    ///
    /// # Panics
    /// Panics if the buffer is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> bool {
        let octet_index = self.index / 8;
        let bit_index = self.index % 8;
        assert!(octet_index < self.data.len(), "bit buffer exhausted");
        self.index += 1;
        (self.data[octet_index] >> (7 - bit_index)) & 1 != 0
    }

    /// Reads `len` bits as a u32, MSB-first.
    ///
    /// # Panics
    /// Panics if `len` > 32 or the buffer is exhausted.
    #[inline]
    pub fn read_bits(&mut self, len: usize) -> u32 {
        assert!(len <= 32, "len must be <= 32");
        let mut result = 0u32;
        for _ in 0..len {
            result <<= 1;
            result |= u32::from(self.read_bit());
        }
        result
    }

    /// Reads `len` bits as a u64, MSB-first.
    ///
    /// # Panics
    /// Panics if `len` > 64 or the buffer is exhausted.
    #[inline]
    pub fn read_bits_long(&mut self, len: usize) -> u64 {
        assert!(len <= 64, "len must be <= 64");
        let mut result = 0u64;
        for _ in 0..len {
            result <<= 1;
            result |= u64::from(self.read_bit());
        }
        result
    }
}
