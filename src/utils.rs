// Single-word bit helpers shared by the layout walk and the set algorithms.

/// Return a mask with the low `n` bits set, for `n` in `0..64`.
#[inline]
pub fn mask_lo(n: usize) -> u64 {
    debug_assert!(n < u64::BITS as usize);
    (1u64 << n) - 1
}

/// Return a mask with only bit `n` set.
#[inline]
pub fn mask_bit(n: usize) -> u64 {
    debug_assert!(n < u64::BITS as usize);
    1u64 << n
}

#[inline]
pub fn get_bit(word: u64, n: usize) -> bool {
    word & mask_bit(n) != 0
}

// True if every 1-bit of `a` is also set in `b`.
#[inline]
pub fn is_subset_word(a: u64, b: u64) -> bool {
    a & !b == 0
}

/// Iterate over the positions of the 1-bits in `word`, lowest first.
pub fn ones(mut word: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if word == 0 {
            return None;
        }
        let n = word.trailing_zeros() as usize;
        // clear the lowest set bit
        word &= word - 1;
        Some(n)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks() {
        assert_eq!(mask_lo(0), 0);
        assert_eq!(mask_lo(3), 0b111);
        assert_eq!(mask_lo(63), u64::MAX >> 1);
        assert_eq!(mask_bit(5), 0b100000);
        assert!(get_bit(0b1010, 1));
        assert!(!get_bit(0b1010, 2));
    }

    #[test]
    fn test_subset_word() {
        assert!(is_subset_word(0, 0));
        assert!(is_subset_word(0b0101, 0b1101));
        assert!(!is_subset_word(0b0011, 0b0001));
    }

    #[test]
    fn test_ones() {
        assert_eq!(ones(0).count(), 0);
        assert_eq!(ones(0b1001_0010).collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(ones(1 << 63).collect::<Vec<_>>(), vec![63]);
    }
}
