use std::fmt;
use std::ops::Index;

use log::debug;

use crate::error::{Error, Result};
use crate::layout::{
    blocks_for, chain_len, data_offset, empty_chain, Position, BLOCK_BITS, NEXT_FLAG,
    PRESENCE_MASK,
};
use crate::utils::get_bit;

/// A set of bit indices in `0..capacity()`, stored as a chain of metadata
/// words followed by only the non-zero 64-bit data words.
///
/// Out-of-range indices and binary operations between sets of different
/// capacity are programming errors and panic. The `try_*` variants return
/// an [`Error`] instead.
#[derive(Clone, Eq)]
pub struct SparseBitSet {
    // metadata chain followed by data words
    pub(crate) store: Vec<u64>,
    // number of metadata words at the front of `store`
    pub(crate) blocks: usize,
}

impl SparseBitSet {
    /// An empty set with a single metadata block (capacity 4032).
    pub fn new() -> Self {
        Self {
            store: vec![0],
            blocks: 1,
        }
    }

    /// An empty set able to address at least `bits` bits, rounded up to a
    /// multiple of 4032.
    pub fn with_capacity(bits: usize) -> Self {
        let blocks = blocks_for(bits);
        Self {
            store: empty_chain(blocks),
            blocks,
        }
    }

    // Assemble a set from raw parts that already satisfy the layout invariants.
    pub(crate) fn from_raw(store: Vec<u64>, blocks: usize) -> Self {
        let set = Self { store, blocks };
        set.debug_check_invariants();
        set
    }

    /// Number of addressable bits.
    pub fn capacity(&self) -> usize {
        self.blocks * BLOCK_BITS
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.data()
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// True if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.metadata().iter().all(|meta| meta & PRESENCE_MASK == 0)
    }

    /// Number of data words currently stored.
    pub fn num_words(&self) -> usize {
        self.store.len() - self.blocks
    }

    /// Approximate heap memory usage in bytes.
    pub fn heap_bytes(&self) -> usize {
        self.store.capacity() * std::mem::size_of::<u64>()
    }

    pub fn get(&self, index: usize) -> bool {
        self.try_get(index).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_get(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let pos = Position::of(index);
        if !get_bit(self.store[pos.block], pos.slot) {
            return Ok(false);
        }
        let word = self.store[data_offset(&self.store, self.blocks, pos)];
        Ok(get_bit(word, pos.bit))
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.try_set(index, value).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_set(&mut self, index: usize, value: bool) -> Result<()> {
        self.check_index(index)?;
        let pos = Position::of(index);
        let present = get_bit(self.store[pos.block], pos.slot);

        // Clearing a bit in an absent word changes nothing.
        if !present && !value {
            return Ok(());
        }

        let offset = data_offset(&self.store, self.blocks, pos);
        if !present {
            self.store.insert(offset, 0);
            self.store[pos.block] |= pos.presence_mask();
        }

        if value {
            self.store[offset] |= pos.bit_mask();
        } else {
            self.store[offset] &= !pos.bit_mask();
        }

        // Zero words are never stored.
        if self.store[offset] == 0 {
            self.store.remove(offset);
            self.store[pos.block] &= !pos.presence_mask();
        }
        Ok(())
    }

    /// Grow the set so it can address at least `bits` bits. Never shrinks.
    ///
    /// Only the metadata chain is extended. Existing data words keep their
    /// relative order and every previously valid index keeps its value.
    pub fn resize(&mut self, bits: usize) {
        if bits <= self.capacity() {
            return;
        }
        let blocks = blocks_for(bits);
        let added = blocks - self.blocks;
        debug!(
            "growing sparse bitset from {} to {} metadata blocks",
            self.blocks, blocks
        );

        self.store[self.blocks - 1] |= NEXT_FLAG;
        let tail = (0..added).map(|i| if i + 1 < added { NEXT_FLAG } else { 0 });
        self.store.splice(self.blocks..self.blocks, tail);
        self.blocks = blocks;
        self.debug_check_invariants();
    }

    /// Remove every member. The capacity is reset to a single block (4032
    /// bits); call [`resize`](Self::resize) to restore a larger capacity.
    pub fn clear(&mut self) {
        debug!("clearing sparse bitset with {} metadata blocks", self.blocks);
        self.store.clear();
        self.store.push(0);
        self.blocks = 1;
    }

    pub(crate) fn metadata(&self) -> &[u64] {
        &self.store[..self.blocks]
    }

    pub(crate) fn data(&self) -> &[u64] {
        &self.store[self.blocks..]
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let capacity = self.capacity();
        if index >= capacity {
            return Err(Error::IndexOutOfRange { index, capacity });
        }
        Ok(())
    }

    pub(crate) fn check_capacity(&self, other: &Self) -> Result<()> {
        if self.blocks != other.blocks {
            return Err(Error::CapacityMismatch {
                left: self.capacity(),
                right: other.capacity(),
            });
        }
        Ok(())
    }

    pub(crate) fn assert_capacity(&self, other: &Self) {
        if let Err(err) = self.check_capacity(other) {
            panic!("{err}");
        }
    }

    pub(crate) fn debug_check_invariants(&self) {
        if cfg!(debug_assertions) {
            debug_assert_eq!(chain_len(&self.store), self.blocks);
            let announced: usize = self
                .metadata()
                .iter()
                .map(|m| (m & PRESENCE_MASK).count_ones() as usize)
                .sum();
            debug_assert_eq!(announced, self.num_words());
            debug_assert!(self.data().iter().all(|&w| w != 0));
        }
    }
}

impl Default for SparseBitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for SparseBitSet {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        if self.get(index) {
            &true
        } else {
            &false
        }
    }
}

impl fmt::Debug for SparseBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseBitSet")
            .field("capacity", &self.capacity())
            .field("count", &self.count())
            .field("words", &self.num_words())
            .finish()
    }
}
