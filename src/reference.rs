//! Dense reference bit set.
//!
//! A plain uncompressed bitmap used as an oracle when checking the sparse
//! encoding: every position costs one bit regardless of content.

use simple_sds::raw_vector::{AccessRaw, RawVector};

use crate::bitvector::BitVector;

#[derive(Clone, Debug)]
pub struct DenseBitSet {
    bits: RawVector,
}

impl DenseBitSet {
    /// A dense set of exactly `len` bits, all zero.
    pub fn new(len: usize) -> Self {
        Self {
            bits: RawVector::with_len(len, false),
        }
    }

    /// Combine two dense sets of equal length bit by bit.
    pub fn zip_with(&self, other: &Self, f: impl Fn(bool, bool) -> bool) -> Self {
        assert_eq!(self.bits.len(), other.bits.len(), "length mismatch");
        let mut out = Self::new(self.bits.len());
        for i in 0..self.bits.len() {
            if f(self.bits.bit(i), other.bits.bit(i)) {
                out.bits.set_bit(i, true);
            }
        }
        out
    }

    /// True if every 1-bit of `self` is also set in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        assert_eq!(self.bits.len(), other.bits.len(), "length mismatch");
        (0..self.bits.len()).all(|i| !self.bits.bit(i) || other.bits.bit(i))
    }
}

impl BitVector for DenseBitSet {
    fn get(&self, index: usize) -> bool {
        assert!(index < self.bits.len(), "out of bounds");
        self.bits.bit(index)
    }

    fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.bits.len(), "out of bounds");
        self.bits.set_bit(index, value);
    }

    fn count(&self) -> usize {
        self.bits.count_ones()
    }

    fn capacity(&self) -> usize {
        self.bits.len()
    }
}
