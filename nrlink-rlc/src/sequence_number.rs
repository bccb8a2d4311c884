//! 10-bit RLC sequence number arithmetic, modulo 1024.
//!
//! Comparisons between sequence numbers are only meaningful relative to a
//! common modulus base (the lower edge of the reordering window). Callers
//! re-anchor the base with [`SequenceNumber10::set_modulus_base`] before
//! comparing; the ordering is then taken on the offsets from that base.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

const SN_MODULUS: u16 = 1024;
const SN_MASK: u16 = SN_MODULUS - 1;

/// A sequence number in `[0, 1024)` together with its comparison base.
#[derive(Debug, Clone, Copy)]
pub struct SequenceNumber10 {
    value: u16,
    modulus_base: u16,
}

impl SequenceNumber10 {
    /// Creates a sequence number with modulus base 0.
    pub const fn new(value: u16) -> Self {
        Self {
            value: value & SN_MASK,
            modulus_base: 0,
        }
    }

    /// Returns the raw 10-bit value.
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Re-anchors the comparison base to the value of `base`.
    pub fn set_modulus_base(&mut self, base: SequenceNumber10) {
        self.modulus_base = base.value;
    }

    /// Distance from the modulus base, as an unsigned 10-bit quantity.
    fn offset(&self) -> u16 {
        self.value.wrapping_sub(self.modulus_base) & SN_MASK
    }
}

impl PartialEq for SequenceNumber10 {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for SequenceNumber10 {}

impl PartialOrd for SequenceNumber10 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        debug_assert_eq!(
            self.modulus_base, other.modulus_base,
            "comparing sequence numbers with different modulus bases"
        );
        if self.value == other.value {
            Some(Ordering::Equal)
        } else {
            self.offset().partial_cmp(&other.offset())
        }
    }
}

impl Add<u16> for SequenceNumber10 {
    type Output = SequenceNumber10;

    fn add(self, delta: u16) -> SequenceNumber10 {
        SequenceNumber10 {
            value: self.value.wrapping_add(delta) & SN_MASK,
            modulus_base: self.modulus_base,
        }
    }
}

impl AddAssign<u16> for SequenceNumber10 {
    fn add_assign(&mut self, delta: u16) {
        self.value = self.value.wrapping_add(delta) & SN_MASK;
    }
}

impl Sub<u16> for SequenceNumber10 {
    type Output = SequenceNumber10;

    fn sub(self, delta: u16) -> SequenceNumber10 {
        SequenceNumber10 {
            value: self.value.wrapping_sub(delta) & SN_MASK,
            modulus_base: self.modulus_base,
        }
    }
}

impl fmt::Display for SequenceNumber10 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchored(value: u16, base: u16) -> SequenceNumber10 {
        let mut sn = SequenceNumber10::new(value);
        sn.set_modulus_base(SequenceNumber10::new(base));
        sn
    }

    #[test]
    fn test_wraps_modulo_1024() {
        assert_eq!(SequenceNumber10::new(1024).value(), 0);
        assert_eq!((SequenceNumber10::new(1023) + 1).value(), 0);
        assert_eq!((SequenceNumber10::new(0) - 1).value(), 1023);
    }

    #[test]
    fn test_ordering_without_wraparound() {
        let a = anchored(10, 0);
        let b = anchored(20, 0);
        assert!(a < b);
        assert!(b > a);
        assert!(a <= anchored(10, 0));
    }

    #[test]
    fn test_ordering_across_wraparound() {
        // With a base near the top of the space, a post-wrap value orders
        // after a pre-wrap one.
        let a = anchored(1020, 1020);
        let b = anchored(3, 1020);
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn test_offset_agrees_with_raw_modular_arithmetic() {
        for &(a, b, base) in &[(1020u16, 3u16, 1020u16), (0, 511, 512), (700, 100, 600)] {
            let sa = anchored(a, base);
            let sb = anchored(b, base);
            let oa = a.wrapping_sub(base) & 0x3ff;
            let ob = b.wrapping_sub(base) & 0x3ff;
            assert_eq!(sa < sb, oa < ob, "a={a} b={b} base={base}");
        }
    }

    #[test]
    fn test_equality_ignores_base() {
        let a = anchored(5, 0);
        let b = anchored(5, 0);
        assert_eq!(a, b);
        assert_ne!(a, anchored(6, 0));
    }

    #[test]
    fn test_arithmetic_keeps_base() {
        let mut sn = anchored(1000, 900);
        sn += 30;
        assert_eq!(sn.value(), 6);
        assert!(anchored(1000, 900) < sn);
    }
}
