//! Physical layout of a sparse bit set.
//!
//! Storage is one `Vec<u64>` partitioned into two runs:
//!
//! ```text
//! [ meta_0, meta_1, ..., meta_k | data_0, data_1, ... ]
//! ```
//!
//! Each metadata word uses its top bit as a continuation flag (set on every
//! metadata word except the last) and its low 63 bits as presence bits.
//! Presence bit `i` of metadata block `b` says whether the data word covering
//! bits `[b * 4032 + i * 64, b * 4032 + i * 64 + 64)` is stored. Data words
//! follow the chain in the order their presence bits are announced, and a
//! stored data word is never zero.

use crate::utils::{mask_bit, mask_lo};

/// Number of bits in a storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Number of presence bits in a metadata word.
pub const PRESENCE_BITS: usize = WORD_BITS - 1;

/// Number of logical bits addressed by one metadata block.
pub const BLOCK_BITS: usize = PRESENCE_BITS * WORD_BITS;

/// Continuation flag: another metadata word follows.
pub const NEXT_FLAG: u64 = 1 << PRESENCE_BITS;

/// The presence bits of a metadata word.
pub const PRESENCE_MASK: u64 = !NEXT_FLAG;

/// Where a logical bit index lives in the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Metadata block containing the index
    pub block: usize,
    /// Presence bit within that block
    pub slot: usize,
    /// Bit within the data word
    pub bit: usize,
}

impl Position {
    pub fn of(index: usize) -> Self {
        let word = index / WORD_BITS;
        Self {
            block: word / PRESENCE_BITS,
            slot: word % PRESENCE_BITS,
            bit: index % WORD_BITS,
        }
    }

    /// Mask selecting this position's presence bit in its metadata word.
    pub fn presence_mask(&self) -> u64 {
        mask_bit(self.slot)
    }

    /// Mask selecting this position's bit in its data word.
    pub fn bit_mask(&self) -> u64 {
        mask_bit(self.bit)
    }
}

/// Number of metadata blocks needed to address `bits` logical bits.
/// The chain is never empty, so this is at least one.
pub fn blocks_for(bits: usize) -> usize {
    bits.div_ceil(BLOCK_BITS).max(1)
}

/// Logical index of the first bit covered by the data word at `slot` in `block`.
pub fn word_base(block: usize, slot: usize) -> usize {
    block * BLOCK_BITS + slot * WORD_BITS
}

/// Count the metadata words in the chain by following continuation flags.
pub fn chain_len(store: &[u64]) -> usize {
    store
        .iter()
        .position(|&meta| meta & NEXT_FLAG == 0)
        .map_or(store.len(), |last| last + 1)
}

/// Build a fresh chain of `blocks` empty metadata words.
pub fn empty_chain(blocks: usize) -> Vec<u64> {
    debug_assert!(blocks > 0);
    let mut chain = vec![NEXT_FLAG; blocks];
    chain[blocks - 1] = 0;
    chain
}

/// Physical offset of the data word for `pos`, or the offset where it would
/// be inserted if absent. `blocks` is the length of the metadata chain.
///
/// Walks every metadata block before `pos.block`, so the cost is linear in
/// the block index. Offsets shift on every insertion or removal, so callers
/// recompute them instead of holding on to them across a mutation.
pub fn data_offset(store: &[u64], blocks: usize, pos: Position) -> usize {
    debug_assert!(pos.block < blocks);
    let preceding: usize = store[..pos.block]
        .iter()
        .map(|&meta| (meta & PRESENCE_MASK).count_ones() as usize)
        .sum();
    let within = (store[pos.block] & mask_lo(pos.slot)).count_ones() as usize;
    blocks + preceding + within
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(BLOCK_BITS, 4032);
        assert_eq!(NEXT_FLAG, 0x8000_0000_0000_0000);
        assert_eq!(PRESENCE_MASK.count_ones(), 63);
    }

    #[test]
    fn test_position() {
        assert_eq!(Position::of(0), Position { block: 0, slot: 0, bit: 0 });
        assert_eq!(Position::of(67), Position { block: 0, slot: 1, bit: 3 });
        assert_eq!(Position::of(4031), Position { block: 0, slot: 62, bit: 63 });
        assert_eq!(Position::of(4032), Position { block: 1, slot: 0, bit: 0 });
        assert_eq!(Position::of(11999), Position { block: 2, slot: 61, bit: 31 });
        let pos = Position::of(11999);
        assert_eq!(word_base(pos.block, pos.slot) + pos.bit, 11999);
    }

    #[test]
    fn test_blocks_for() {
        assert_eq!(blocks_for(0), 1);
        assert_eq!(blocks_for(1), 1);
        assert_eq!(blocks_for(4032), 1);
        assert_eq!(blocks_for(4033), 2);
        assert_eq!(blocks_for(12000), 3);
    }

    #[test]
    fn test_chain() {
        let chain = empty_chain(3);
        assert_eq!(chain, vec![NEXT_FLAG, NEXT_FLAG, 0]);
        assert_eq!(chain_len(&chain), 3);
        assert_eq!(chain_len(&[0, 7, 9]), 1);
    }

    #[test]
    fn test_data_offset() {
        // two blocks: block 0 announces slots 0 and 5, block 1 announces slot 2
        let store = [NEXT_FLAG | 0b100001, 0b100, 11, 22, 33];
        assert_eq!(data_offset(&store, 2, Position::of(0)), 2);
        assert_eq!(data_offset(&store, 2, Position::of(64)), 3);
        assert_eq!(data_offset(&store, 2, Position::of(5 * 64)), 3);
        assert_eq!(data_offset(&store, 2, Position::of(6 * 64)), 4);
        assert_eq!(data_offset(&store, 2, Position::of(BLOCK_BITS + 2 * 64)), 4);
        assert_eq!(data_offset(&store, 2, Position::of(BLOCK_BITS + 3 * 64)), 5);
    }
}
