//! PER-style primitive encoder and decoder.
//!
//! This is not full ASN.1 PER; it is the compatible subset the RRC message
//! codecs are written against: minimal-width integers over a declared
//! range, minimal-width enum indices and choice selectors, sequences
//! prefixed by an extension marker and an optional-field bitmap, and
//! fixed-width bit strings. Every message codec is a fixed composition of
//! these primitives, so encoder and decoder are always hand-paired.
//!
//! Contract violations (out-of-range values, exhausted input) are
//! programming errors between the paired sides and panic.

use nrlink_common::{BitReader, BitWriter};

/// Bits needed to represent `count` distinct values.
fn bit_width(count: u64) -> usize {
    if count <= 1 {
        0
    } else {
        64 - (count - 1).leading_zeros() as usize
    }
}

/// Write-side primitive codec. Obtain the final byte buffer with
/// [`Asn1Encoder::finish`], which pads to an octet boundary.
#[derive(Debug, Default)]
pub struct Asn1Encoder {
    writer: BitWriter,
}

impl Asn1Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packs `value - min` into the minimal width for `[min, max]`.
    pub fn integer(&mut self, value: i64, min: i64, max: i64) {
        assert!(
            min <= value && value <= max,
            "integer {value} out of range [{min}, {max}]"
        );
        let width = bit_width((max - min) as u64 + 1);
        self.writer.write_bits_long((value - min) as u64, width);
    }

    /// Packs `index` into the minimal width for `cardinality` values.
    pub fn enumerated(&mut self, cardinality: u32, index: u32) {
        assert!(
            index < cardinality,
            "enum index {index} out of cardinality {cardinality}"
        );
        self.writer
            .write_bits(index, bit_width(u64::from(cardinality)));
    }

    pub fn boolean(&mut self, value: bool) {
        self.writer.write_bit(value);
    }

    /// One extension bit (if extensible) plus a minimal-width selector.
    pub fn choice(&mut self, num_options: u32, selected: u32, extensible: bool) {
        assert!(
            selected < num_options,
            "choice selector {selected} out of {num_options} options"
        );
        if extensible {
            self.writer.write_bit(false);
        }
        self.writer
            .write_bits(selected, bit_width(u64::from(num_options)));
    }

    /// One extension bit (if extensible) plus the optional-field presence
    /// bitmap, one bit per optional field in declared order.
    pub fn sequence(&mut self, extensible: bool, optional_present: &[bool]) {
        if extensible {
            self.writer.write_bit(false);
        }
        for &present in optional_present {
            self.writer.write_bit(present);
        }
    }

    /// Packs `count - min` into the minimal width for `[min, max]`.
    pub fn sequence_of(&mut self, count: u32, min: u32, max: u32) {
        assert!(
            min <= count && count <= max,
            "sequence-of count {count} out of range [{min}, {max}]"
        );
        self.writer
            .write_bits(count - min, bit_width(u64::from(max - min) + 1));
    }

    /// Verbatim fixed-width bit string, MSB first.
    pub fn bitstring(&mut self, value: u64, width: usize) {
        assert!(
            width == 64 || value < 1u64 << width,
            "bitstring value {value} wider than {width} bits"
        );
        self.writer.write_bits_long(value, width);
    }

    /// ASN.1 NULL: zero bits.
    pub fn null(&mut self) {}

    /// Pads to the next octet boundary and returns the encoded bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.writer.align_to_byte();
        self.writer.into_bytes()
    }
}

/// Read-side primitive codec, mirroring [`Asn1Encoder`] call for call.
#[derive(Debug)]
pub struct Asn1Decoder<'a> {
    reader: BitReader<'a>,
}

impl<'a> Asn1Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BitReader::new(data),
        }
    }

    pub fn integer(&mut self, min: i64, max: i64) -> i64 {
        let width = bit_width((max - min) as u64 + 1);
        let raw = self.reader.read_bits_long(width) as i64;
        let value = min + raw;
        assert!(value <= max, "decoded integer {value} above {max}");
        value
    }

    pub fn enumerated(&mut self, cardinality: u32) -> u32 {
        let index = self.reader.read_bits(bit_width(u64::from(cardinality)));
        assert!(
            index < cardinality,
            "decoded enum index {index} out of cardinality {cardinality}"
        );
        index
    }

    pub fn boolean(&mut self) -> bool {
        self.reader.read_bit()
    }

    pub fn choice(&mut self, num_options: u32, extensible: bool) -> u32 {
        if extensible {
            let extended = self.reader.read_bit();
            assert!(!extended, "extension choice values not supported");
        }
        let selected = self.reader.read_bits(bit_width(u64::from(num_options)));
        assert!(
            selected < num_options,
            "decoded choice selector {selected} out of {num_options} options"
        );
        selected
    }

    /// Reads the extension marker (if extensible) and the presence bitmap,
    /// returned in declared field order.
    pub fn sequence(&mut self, extensible: bool, num_optional: usize) -> Vec<bool> {
        if extensible {
            let extended = self.reader.read_bit();
            assert!(!extended, "extension sequence fields not supported");
        }
        (0..num_optional).map(|_| self.reader.read_bit()).collect()
    }

    pub fn sequence_of(&mut self, min: u32, max: u32) -> u32 {
        let count = min + self.reader.read_bits(bit_width(u64::from(max - min) + 1));
        assert!(count <= max, "decoded sequence-of count {count} above {max}");
        count
    }

    pub fn bitstring(&mut self, width: usize) -> u64 {
        self.reader.read_bits_long(width)
    }

    pub fn null(&mut self) {}

    /// Unread bits, including any trailing alignment padding.
    pub fn remaining_bits(&self) -> usize {
        self.reader.remaining_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_width() {
        assert_eq!(bit_width(1), 0);
        assert_eq!(bit_width(2), 1);
        assert_eq!(bit_width(3), 2);
        assert_eq!(bit_width(6), 3);
        assert_eq!(bit_width(16), 4);
        assert_eq!(bit_width(17), 5);
        assert_eq!(bit_width(262_144), 18);
    }

    #[test]
    fn test_integer_minimal_width() {
        let mut enc = Asn1Encoder::new();
        enc.integer(5, 0, 15); // 4 bits
        enc.integer(-70, -70, -22); // 6 bits
        enc.integer(3, 3, 3); // 0 bits
        let bytes = enc.finish();
        assert_eq!(bytes.len(), 2); // 10 bits padded to 16

        let mut dec = Asn1Decoder::new(&bytes);
        assert_eq!(dec.integer(0, 15), 5);
        assert_eq!(dec.integer(-70, -22), -70);
        assert_eq!(dec.integer(3, 3), 3);
    }

    #[test]
    fn test_sequence_bitmap_roundtrip() {
        let mut enc = Asn1Encoder::new();
        enc.sequence(true, &[true, false, true]);
        enc.sequence(false, &[]);
        enc.choice(4, 2, true);
        enc.enumerated(6, 5);
        enc.sequence_of(3, 1, 11);
        enc.bitstring(0xabc, 12);
        enc.boolean(true);
        let bytes = enc.finish();

        let mut dec = Asn1Decoder::new(&bytes);
        assert_eq!(dec.sequence(true, 3), vec![true, false, true]);
        assert_eq!(dec.sequence(false, 0), Vec::<bool>::new());
        assert_eq!(dec.choice(4, true), 2);
        assert_eq!(dec.enumerated(6), 5);
        assert_eq!(dec.sequence_of(1, 11), 3);
        assert_eq!(dec.bitstring(12), 0xabc);
        assert!(dec.boolean());
        assert!(dec.remaining_bits() < 8);
    }

    #[test]
    fn test_finish_pads_to_octet() {
        let mut enc = Asn1Encoder::new();
        enc.boolean(true);
        let bytes = enc.finish();
        assert_eq!(bytes, vec![0x80]);

        let empty = Asn1Encoder::new().finish();
        assert!(empty.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_integer_out_of_range_panics() {
        let mut enc = Asn1Encoder::new();
        enc.integer(33, 1, 32);
    }

    #[test]
    #[should_panic(expected = "bit buffer exhausted")]
    fn test_decoder_exhaustion_panics() {
        let mut dec = Asn1Decoder::new(&[0x00]);
        dec.integer(0, 1023);
    }
}
