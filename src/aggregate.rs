//! Counting and predicate queries over the live bits.

use crate::{
    Bitset,
    word::{WORD_BITS, Word, tail_mask, words_for},
};

impl<const EXPAND: usize> Bitset<EXPAND> {
    /// Live words with the padding of the last word cleared.
    fn masked_words(&self) -> impl DoubleEndedIterator<Item = (usize, Word)> + '_ {
        let last = words_for(self.len).wrapping_sub(1);
        let tail = tail_mask(self.len);
        self.as_words()
            .iter()
            .enumerate()
            .map(move |(k, &w)| (k, if k == last { w & tail } else { w }))
    }

    /// Counts the set bits.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1011 0011")?;
    /// assert_eq!(bs.count_ones(), 5);
    /// assert_eq!(bs.count_zeros(), 3);
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.masked_words().map(|(_, w)| w.count_ones() as usize).sum()
    }

    /// Counts the clear bits.
    #[must_use]
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    /// Counts the zero bits before the first set bit. Returns `len()` when no
    /// bit is set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("0010 0100")?;
    /// assert_eq!(bs.leading_zeros(), 2);
    /// assert_eq!(bs.trailing_zeros(), 2);
    /// assert_eq!(Bitset::<4>::from_bit_str("000")?.leading_zeros(), 3);
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[must_use]
    pub fn leading_zeros(&self) -> usize {
        self.masked_words()
            .find(|&(_, w)| w != 0)
            .map_or(self.len, |(k, w)| k * WORD_BITS + w.leading_zeros() as usize)
    }

    /// Counts the zero bits after the last set bit. Returns `len()` when no
    /// bit is set.
    #[must_use]
    pub fn trailing_zeros(&self) -> usize {
        self.masked_words()
            .rev()
            .find(|&(_, w)| w != 0)
            .map_or(self.len, |(k, w)| {
                let last_set = k * WORD_BITS + (WORD_BITS - 1 - w.trailing_zeros() as usize);
                self.len - 1 - last_set
            })
    }

    /// Returns `true` when an odd number of bits is set.
    #[must_use]
    pub fn parity(&self) -> bool {
        self.masked_words().fold(0, |acc, (_, w)| acc ^ w).count_ones() & 1 == 1
    }

    /// Returns `true` when every bit is set. An empty bitset qualifies.
    #[must_use]
    pub fn all(&self) -> bool {
        let tail = tail_mask(self.len);
        match self.as_words().split_last() {
            None => true,
            Some((&last, rest)) => rest.iter().all(|&w| w == Word::MAX) && last & tail == tail,
        }
    }

    /// Returns `true` when at least one bit is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.masked_words().any(|(_, w)| w != 0)
    }

    /// Returns `true` when no bit is set.
    #[must_use]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Compares length and live bits; padding and capacity are ignored.
    #[must_use]
    pub fn bits_eq<const F: usize>(&self, other: &Bitset<F>) -> bool {
        self.len == other.len && self.masked_words().zip(other.masked_words()).all(|((_, a), (_, b))| a == b)
    }
}
