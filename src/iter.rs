// Ascending iteration over the set bits of a sparse set.

use std::iter::FusedIterator;

use crate::layout::{word_base, PRESENCE_MASK};
use crate::sparsebitset::SparseBitSet;

/// Iterator over the indices of the set bits, in ascending order.
///
/// Holds two cursors into the set's storage: one over the metadata chain
/// (the current block and its presence bits not yet visited) and one over
/// the data words (the next word offset and the bits of the current word
/// not yet yielded). The shared borrow keeps the set from being mutated
/// while the iterator is alive.
#[derive(Debug, Clone)]
pub struct Ones<'a> {
    store: &'a [u64],
    blocks: usize,
    // metadata cursor
    block: usize,
    presence: u64,
    // data cursor
    offset: usize,
    word: u64,
    base: usize,
}

impl<'a> Ones<'a> {
    fn new(set: &'a SparseBitSet) -> Self {
        Self {
            store: &set.store,
            blocks: set.blocks,
            block: 0,
            presence: set.store[0] & PRESENCE_MASK,
            offset: set.blocks,
            word: 0,
            base: 0,
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.word != 0 {
                let bit = self.word.trailing_zeros() as usize;
                self.word &= self.word - 1;
                return Some(self.base + bit);
            }

            // Move to the next presence bit, following the chain as needed.
            while self.presence == 0 {
                if self.block + 1 >= self.blocks {
                    return None;
                }
                self.block += 1;
                self.presence = self.store[self.block] & PRESENCE_MASK;
            }
            let slot = self.presence.trailing_zeros() as usize;
            self.presence &= self.presence - 1;

            self.word = self.store[self.offset];
            self.offset += 1;
            self.base = word_base(self.block, slot);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.word.count_ones() as usize;
        let words = self.store.len() - self.offset;
        (pending + words, Some(pending + words * u64::BITS as usize))
    }
}

impl FusedIterator for Ones<'_> {}

impl SparseBitSet {
    /// Iterate over the indices of the set bits in ascending order.
    pub fn iter(&self) -> Ones<'_> {
        Ones::new(self)
    }
}

impl<'a> IntoIterator for &'a SparseBitSet {
    type Item = usize;
    type IntoIter = Ones<'a>;

    fn into_iter(self) -> Ones<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [usize; 10] = [1, 10, 100, 1000, 4000, 6000, 10000, 12000, 24000, 54000];

    #[test]
    fn test_single_bit() {
        for len in SIZES {
            let mut a = SparseBitSet::with_capacity(len);
            a.set(3, true);
            let mut it = a.iter();
            assert_eq!(it.next(), Some(3));
            assert_eq!(it.next(), None);
            assert_eq!(it.next(), None);
        }
    }

    #[test]
    fn test_empty() {
        for len in SIZES {
            let a = SparseBitSet::with_capacity(len);
            assert!(a.is_empty());
            assert_eq!(a.iter().next(), None);
        }
    }

    #[test]
    fn test_every_third() {
        for len in SIZES {
            let mut a = SparseBitSet::with_capacity(len);
            for i in (0..len).step_by(3) {
                a.set(i, true);
            }
            let expected: Vec<usize> = (0..len).step_by(3).collect();
            assert_eq!(a.iter().collect::<Vec<_>>(), expected, "len {len}");
            assert_eq!(a.iter().count(), a.count());
        }
    }

    #[test]
    fn test_last_bit() {
        for len in &SIZES[1..] {
            let mut a = SparseBitSet::with_capacity(*len);
            a.set(len - 3, true);
            let mut it = a.iter();
            assert_eq!(it.next(), Some(len - 3));
            assert_eq!(it.next(), None);
        }
    }

    #[test]
    fn test_block_edges() {
        let ones = [0, 63, 64, 4031, 4032, 4095, 8063, 8064, 12095];
        let mut a = SparseBitSet::with_capacity(12096);
        for &i in ones.iter().rev() {
            a.set(i, true);
        }
        assert_eq!(a.iter().collect::<Vec<_>>(), ones);
        assert_eq!((&a).into_iter().count(), ones.len());
    }

    #[test]
    fn test_empty_leading_blocks() {
        let mut a = SparseBitSet::with_capacity(3 * 4032);
        a.set(2 * 4032 + 1, true);
        a.set(2 * 4032 + 700, true);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![8065, 8764]);
    }

    #[test]
    fn test_size_hint() {
        let mut a = SparseBitSet::new();
        a.set(1, true);
        a.set(2, true);
        let mut it = a.iter();
        let (lo, hi) = it.size_hint();
        assert!(lo <= 2 && hi.unwrap() >= 2);
        it.next();
        let (lo, hi) = it.size_hint();
        assert!(lo <= 1 && hi.unwrap() >= 1);
    }
}
