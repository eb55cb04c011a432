// Whole-set boolean algebra over two sparse encodings of equal capacity.
//
// Both operands are walked one metadata block at a time. For every presence
// bit set in either block, the matching data words are pulled from each side
// (an absent word reads as zero), combined, and kept only when non-zero.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

use log::trace;

use crate::error::Result;
use crate::layout::{NEXT_FLAG, PRESENCE_MASK};
use crate::sparsebitset::SparseBitSet;
use crate::utils::{get_bit, mask_bit, ones};

/// A word-level boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOp {
    And,
    Or,
    Xor,
    /// Bits in the left operand that are not in the right, `a ^ (a & b)`.
    Difference,
}

impl BitOp {
    #[inline]
    pub fn apply(self, a: u64, b: u64) -> u64 {
        match self {
            BitOp::And => a & b,
            BitOp::Or => a | b,
            BitOp::Xor => a ^ b,
            BitOp::Difference => a ^ (a & b),
        }
    }
}

impl SparseBitSet {
    /// Combine two sets into a new, independent set. Panics if the
    /// capacities differ.
    pub fn combine(&self, other: &Self, op: BitOp) -> Self {
        self.try_combine(other, op).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_combine(&self, other: &Self, op: BitOp) -> Result<Self> {
        self.check_capacity(other)?;
        trace!(
            "combine {:?}: {} and {} data words",
            op,
            self.num_words(),
            other.num_words()
        );

        let blocks = self.blocks;
        let mut out = Vec::with_capacity(blocks + self.num_words().max(other.num_words()));
        out.resize(blocks, 0);

        // data cursors for each operand
        let mut ia = blocks;
        let mut ib = blocks;
        for block in 0..blocks {
            let va = self.store[block] & PRESENCE_MASK;
            let vb = other.store[block] & PRESENCE_MASK;
            let mut meta = 0;
            for slot in ones(va | vb) {
                let wa = take_word(&self.store, va, slot, &mut ia);
                let wb = take_word(&other.store, vb, slot, &mut ib);
                let w = op.apply(wa, wb);
                if w != 0 {
                    meta |= mask_bit(slot);
                    out.push(w);
                }
            }
            out[block] = meta | (self.store[block] & NEXT_FLAG);
        }

        Ok(SparseBitSet::from_raw(out, blocks))
    }

    /// Apply `op` in place, with `self` as the left operand. Panics if the
    /// capacities differ.
    pub fn update(&mut self, other: &Self, op: BitOp) {
        self.try_update(other, op).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_update(&mut self, other: &Self, op: BitOp) -> Result<()> {
        self.check_capacity(other)?;
        trace!(
            "update {:?}: {} and {} data words",
            op,
            self.num_words(),
            other.num_words()
        );

        let blocks = self.blocks;
        let mut ia = blocks;
        let mut ib = blocks;
        for block in 0..blocks {
            let va = self.store[block] & PRESENCE_MASK;
            let vb = other.store[block] & PRESENCE_MASK;
            let mut meta = va;
            for slot in ones(va | vb) {
                let wb = take_word(&other.store, vb, slot, &mut ib);
                if get_bit(va, slot) {
                    let w = op.apply(self.store[ia], wb);
                    if w != 0 {
                        self.store[ia] = w;
                        ia += 1;
                    } else {
                        self.store.remove(ia);
                        meta &= !mask_bit(slot);
                    }
                } else {
                    let w = op.apply(0, wb);
                    if w != 0 {
                        self.store.insert(ia, w);
                        ia += 1;
                        meta |= mask_bit(slot);
                    }
                }
            }
            self.store[block] = meta | (self.store[block] & NEXT_FLAG);
        }

        self.debug_check_invariants();
        Ok(())
    }
}

// Read the data word announced at `slot` and advance the cursor, or return
// zero without moving when the word is absent.
#[inline]
fn take_word(store: &[u64], presence: u64, slot: usize, cursor: &mut usize) -> u64 {
    if get_bit(presence, slot) {
        let w = store[*cursor];
        *cursor += 1;
        w
    } else {
        0
    }
}

macro_rules! impl_bit_op {
    ($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $op:expr) => {
        impl $op_trait<&SparseBitSet> for &SparseBitSet {
            type Output = SparseBitSet;

            fn $op_fn(self, rhs: &SparseBitSet) -> SparseBitSet {
                self.combine(rhs, $op)
            }
        }

        impl $assign_trait<&SparseBitSet> for SparseBitSet {
            fn $assign_fn(&mut self, rhs: &SparseBitSet) {
                self.update(rhs, $op)
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, BitOp::And);
impl_bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, BitOp::Or);
impl_bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, BitOp::Xor);
impl_bit_op!(Sub, sub, SubAssign, sub_assign, BitOp::Difference);
