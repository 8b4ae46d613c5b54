//! In-place insertion and removal of bit ranges.

use crate::{
    Bitset,
    error::Result,
    word::{WORD_BITS, head_mask, read_word, words_for},
};

impl<const EXPAND: usize> Bitset<EXPAND> {
    /// Shifts every bit from `index` onward by `delta` positions.
    ///
    /// A positive `delta` inserts that many zero bits at `index`. A negative
    /// `delta` removes up to `|delta|` bits starting at `index`, clipped to
    /// the live bits. A negative `index` is clamped to `0`, and an `index`
    /// past the end first grows the bitset with zero bits up to `index`
    /// unless `delta` is negative, in which case nothing happens.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`](crate::BitsetError::Frozen) if the bitset is
    /// frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let mut bs = Bitset::<4>::from_bit_str("1111")?;
    /// bs.slide(2, 3)?;
    /// assert_eq!(bs.to_string(), "1100011");
    /// bs.slide(1, -4)?;
    /// assert_eq!(bs.to_string(), "111");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn slide(&mut self, index: isize, delta: isize) -> Result<()> {
        self.ensure_mutable()?;
        let index = index.max(0).unsigned_abs();
        if delta < 0 {
            self.remove_bits(index, delta.unsigned_abs());
        } else {
            self.insert_bits(index, delta.unsigned_abs());
        }
        Ok(())
    }

    /// Inserts `count` zero bits at `index`, zero-extending up to `index`
    /// first.
    pub(crate) fn insert_bits(&mut self, index: usize, count: usize) {
        if index > self.len {
            self.zero_extend(index);
        }
        if count > 0 {
            self.expand(index, count);
        }
    }

    /// Removes up to `count` bits at `index`; no-op when `index >= len`.
    #[inline]
    pub(crate) fn remove_bits(&mut self, index: usize, count: usize) {
        self.collapse(index, count);
    }

    /// Opens a gap of `gap` zero bits at `index`; `index <= len`.
    fn expand(&mut self, index: usize, gap: usize) {
        let len = self.len;
        let new_len = len + gap;
        log::trace!("bitset: inserting {gap} bits at {index} ({len} -> {new_len})");
        self.storage.ensure_capacity(new_len, EXPAND);

        let words = &mut self.storage[..words_for(new_len)];
        // Walk downward so every source word is read before it is overwritten.
        for k in (index / WORD_BITS..words.len()).rev() {
            let base = k * WORD_BITS;
            let moved = read_word(words, base as isize - gap as isize, len);
            let keep = head_mask(index.saturating_sub(base).min(WORD_BITS));
            let landed = !head_mask((index + gap).saturating_sub(base).min(WORD_BITS));
            words[k] = (words[k] & keep) | (moved & landed);
        }
        self.len = new_len;
    }

    /// Removes up to `count` bits at `index`, pulling later bits forward.
    fn collapse(&mut self, index: usize, count: usize) {
        let len = self.len;
        if index >= len {
            return;
        }
        let count = count.min(len - index);
        let new_len = len - count;
        log::trace!("bitset: removing {count} bits at {index} ({len} -> {new_len})");

        let live = words_for(new_len);
        let words = &mut self.storage[..words_for(len)];
        // Walk upward so every source word is read before it is overwritten.
        for k in index / WORD_BITS..live {
            let base = k * WORD_BITS;
            let moved = read_word(words, (base + count) as isize, len);
            let keep = head_mask(index.saturating_sub(base).min(WORD_BITS));
            words[k] = (words[k] & keep) | (moved & !keep);
        }
        words[live..].fill(0);
        self.len = new_len;
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bitset, EMBED_BITS, WORD_BITS};

    type Bs = Bitset<4>;

    fn bits(s: &str) -> Bs {
        Bs::from_bit_str(s).unwrap()
    }

    #[test]
    fn test_expand_inserts_zeros() {
        let mut bs = bits("1111");
        bs.slide(2, 3).unwrap();
        assert_eq!(bs.len(), 7);
        assert_eq!(bs.to_string(), "1100011");
    }

    #[test]
    fn test_expand_past_end_zero_fills_gap() {
        let mut bs = bits("11");
        bs.slide(5, 2).unwrap();
        assert_eq!(bs.len(), 7);
        assert_eq!(bs.to_string(), "1100000");

        let mut bs = bits("11");
        bs.slide(4, 0).unwrap();
        assert_eq!(bs.to_string(), "1100");
    }

    #[test]
    fn test_collapse_clips_to_live_bits() {
        let mut bs = bits("10110011");
        bs.slide(6, -5).unwrap();
        assert_eq!(bs.to_string(), "101100");

        // removing past the end is a no-op
        bs.slide(10, -3).unwrap();
        assert_eq!(bs.len(), 6);
    }

    #[test]
    fn test_negative_index_clamps() {
        let mut bs = bits("11");
        bs.slide(-5, 1).unwrap();
        assert_eq!(bs.to_string(), "011");
    }

    #[test]
    fn test_expand_across_words_and_promotion() {
        let mut bs = Bs::new();
        bs.resize(EMBED_BITS).unwrap();
        bs.fill(true).unwrap();
        bs.slide(1, WORD_BITS as isize + 3).unwrap();
        assert!(bs.is_heap());
        assert_eq!(bs.len(), EMBED_BITS + WORD_BITS + 3);
        assert_eq!(bs.count_ones(), EMBED_BITS);
        assert!(bs.test(0).unwrap());
        assert_eq!(bs.get(1, WORD_BITS).unwrap(), 0);
        assert_eq!(bs.get(WORD_BITS as isize + 1, 3).unwrap(), 0);
        assert!(bs.test(WORD_BITS as isize + 4).unwrap());

        bs.slide(1, -(WORD_BITS as isize) - 3).unwrap();
        assert_eq!(bs.len(), EMBED_BITS);
        assert!(bs.all());
    }

    #[test]
    fn test_collapse_zeroes_released_words() {
        let mut bs = Bs::new();
        bs.resize(2 * WORD_BITS + 5).unwrap();
        bs.fill(true).unwrap();
        bs.slide(0, -(WORD_BITS as isize) - 10).unwrap();
        assert_eq!(bs.len(), WORD_BITS - 5);
        assert_eq!(bs.as_words().len(), 1);
        assert_eq!(bs.storage[1], 0);
        assert_eq!(bs.storage[2], 0);
    }
}
