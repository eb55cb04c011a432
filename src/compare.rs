// Equality and subset relations between sparse sets of equal capacity.
//
// Because zero data words are never stored, two sets hold the same bits
// exactly when their stores are identical, so equality is a slice compare.
// Subset checks walk both encodings in lock-step. Whether the walk saw any
// difference at all is tracked across the whole structure and only combined
// with the subset result at the end, so a proper subset is never concluded
// from a single unequal word.

use std::cmp::Ordering;

use crate::error::Result;
use crate::layout::PRESENCE_MASK;
use crate::sparsebitset::SparseBitSet;
use crate::utils::{get_bit, is_subset_word, ones};

// Outcome of checking whether one set is contained in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inclusion {
    // Some bit of the left set is missing from the right set
    Not,
    // Both sets hold the same bits
    Equal,
    // Every bit of the left set is in the right set, which has more
    Proper,
}

impl Inclusion {
    fn holds(self) -> bool {
        self != Inclusion::Not
    }
}

// Walk `a` and `b` block by block and decide whether `a` is a subset of `b`.
fn inclusion(a: &SparseBitSet, b: &SparseBitSet) -> Inclusion {
    let mut identical = true;
    // data cursors for each operand
    let mut ia = a.blocks;
    let mut ib = b.blocks;
    for block in 0..a.blocks {
        let va = a.store[block] & PRESENCE_MASK;
        let vb = b.store[block] & PRESENCE_MASK;
        // a word stored only in `a` holds a bit that `b` lacks
        if !is_subset_word(va, vb) {
            return Inclusion::Not;
        }
        identical &= va == vb;
        for slot in ones(vb) {
            let wb = b.store[ib];
            ib += 1;
            if get_bit(va, slot) {
                let wa = a.store[ia];
                ia += 1;
                if !is_subset_word(wa, wb) {
                    return Inclusion::Not;
                }
                identical &= wa == wb;
            }
        }
    }
    if identical {
        Inclusion::Equal
    } else {
        Inclusion::Proper
    }
}

impl SparseBitSet {
    /// True if every bit set in `self` is also set in `other`. Panics if
    /// the capacities differ.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.assert_capacity(other);
        inclusion(self, other).holds()
    }

    pub fn try_is_subset(&self, other: &Self) -> Result<bool> {
        self.check_capacity(other)?;
        Ok(inclusion(self, other).holds())
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// True if `self` is a subset of `other` and the two sets differ.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.assert_capacity(other);
        inclusion(self, other) == Inclusion::Proper
    }

    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }
}

impl PartialEq for SparseBitSet {
    fn eq(&self, other: &Self) -> bool {
        self.assert_capacity(other);
        self.store == other.store
    }
}

// Sets are ordered by inclusion: `a <= b` means `a` is a subset of `b`, and
// two sets where neither contains the other are incomparable.
impl PartialOrd for SparseBitSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.assert_capacity(other);
        match inclusion(self, other) {
            Inclusion::Equal => Some(Ordering::Equal),
            Inclusion::Proper => Some(Ordering::Less),
            Inclusion::Not if inclusion(other, self).holds() => Some(Ordering::Greater),
            Inclusion::Not => None,
        }
    }

    fn lt(&self, other: &Self) -> bool {
        self.is_proper_subset(other)
    }

    fn le(&self, other: &Self) -> bool {
        self.is_subset(other)
    }

    fn gt(&self, other: &Self) -> bool {
        self.is_proper_superset(other)
    }

    fn ge(&self, other: &Self) -> bool {
        self.is_superset(other)
    }
}
