use crate::layout::{blocks_for, empty_chain, Position, WORD_BITS};
use crate::sparsebitset::SparseBitSet;
use crate::utils::mask_bit;

// SparseBitSetBuilder collects indices and encodes them in a single pass, so
// bulk construction never splices words into the middle of the store.
#[derive(Debug, Clone)]
pub struct SparseBitSetBuilder {
    ones: Vec<usize>,
    len: usize,
}

impl SparseBitSetBuilder {
    pub fn one(&mut self, index: usize) {
        assert!(index < self.len, "out of bounds");
        self.ones.push(index);
    }

    pub fn build(mut self) -> SparseBitSet {
        self.ones.sort_unstable();
        self.ones.dedup();

        let blocks = blocks_for(self.len);
        let mut store = empty_chain(blocks);
        store.reserve(self.ones.len());

        // Indices are sorted, so data words come out in chain order and each
        // word is complete once we move past it.
        let mut current: Option<usize> = None;
        for &index in &self.ones {
            let word = index / WORD_BITS;
            if current != Some(word) {
                let pos = Position::of(index);
                store[pos.block] |= pos.presence_mask();
                store.push(0);
                current = Some(word);
            }
            if let Some(last) = store.last_mut() {
                *last |= mask_bit(index % WORD_BITS);
            }
        }

        SparseBitSet::from_raw(store, blocks)
    }
}

impl SparseBitSet {
    // Use a builder pattern to construct a set from many indices at once.
    pub fn builder(len: usize) -> SparseBitSetBuilder {
        SparseBitSetBuilder {
            ones: Vec::new(),
            len,
        }
    }
}

/// Collect indices into a set just large enough to hold the largest one.
impl FromIterator<usize> for SparseBitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let ones: Vec<usize> = iter.into_iter().collect();
        let len = ones.iter().max().map_or(0, |&max| max + 1);
        let mut builder = SparseBitSet::builder(len);
        builder.ones = ones;
        builder.build()
    }
}

/// Set every index yielded by the iterator. Indices must be below the
/// current capacity.
impl Extend<usize> for SparseBitSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for index in iter {
            self.set(index, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_builder_matches_set() {
        let mut rng = StdRng::seed_from_u64(50);
        let len = 20000;
        let mut builder = SparseBitSet::builder(len);
        let mut expected = SparseBitSet::with_capacity(len);
        for _ in 0..3000 {
            let index = rng.gen_range(0..len);
            builder.one(index);
            expected.set(index, true);
        }
        let bs = builder.build();
        assert_eq!(bs.capacity(), expected.capacity());
        assert_eq!(bs, expected);
    }

    #[test]
    fn test_builder_empty() {
        let bs = SparseBitSet::builder(0).build();
        assert_eq!(bs, SparseBitSet::new());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_builder_out_of_bounds() {
        SparseBitSet::builder(10).one(10);
    }

    #[test]
    fn test_from_iter() {
        let bs: SparseBitSet = [4001, 3, 67, 3].into_iter().collect();
        assert_eq!(bs.capacity(), 4032);
        assert_eq!(bs.iter().collect::<Vec<_>>(), vec![3, 67, 4001]);

        let bs: SparseBitSet = [9000].into_iter().collect();
        assert_eq!(bs.capacity(), 3 * 4032);

        let bs: SparseBitSet = std::iter::empty().collect();
        assert!(bs.is_empty());
    }

    #[test]
    fn test_extend() {
        let mut bs = SparseBitSet::with_capacity(5000);
        bs.extend([4500, 1, 64]);
        bs.extend(vec![1, 2]);
        assert_eq!(bs.iter().collect::<Vec<_>>(), vec![1, 2, 64, 4500]);
    }
}
