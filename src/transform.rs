//! Whole-bitset transforms: inversion, reversal and two's-complement negation.

use crate::{
    Bitset,
    error::Result,
    word::{WORD_BITS, Word, tail_mask, words_for},
};

impl<const EXPAND: usize> Bitset<EXPAND> {
    /// Inverts every live bit.
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
    /// let mut bs = Bitset::<4>::from_bit_str("10110")?;
    /// bs.flip()?;
    /// assert_eq!(bs.to_string(), "01001");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn flip(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.flip_bits();
        Ok(())
    }

    /// Returns an inverted copy.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut out = self.clone();
        out.flip_bits();
        out
    }

    fn flip_bits(&mut self) {
        let len = self.len;
        if let Some((last, rest)) = self.storage[..words_for(len)].split_last_mut() {
            rest.iter_mut().for_each(|w| *w = !*w);
            *last ^= tail_mask(len);
        }
    }

    /// Reverses the bit order so that bit `i` moves to `len() - 1 - i`.
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
    /// let mut bs = Bitset::<4>::from_bit_str("110100")?;
    /// bs.reflect()?;
    /// assert_eq!(bs.to_string(), "001011");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn reflect(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.reflect_bits();
        Ok(())
    }

    /// Returns a reversed copy.
    #[must_use]
    pub fn reflected(&self) -> Self {
        let mut out = self.clone();
        out.reflect_bits();
        out
    }

    fn reflect_bits(&mut self) {
        let len = self.len;
        let words = &mut self.storage[..words_for(len)];
        words.reverse();
        words.iter_mut().for_each(|w| *w = w.reverse_bits());

        // The padding of the old last word is now at the front; shift it out.
        let rest = len % WORD_BITS;
        if rest != 0 {
            let sh = WORD_BITS - rest;
            for k in 0..words.len() {
                let next = words.get(k + 1).copied().unwrap_or(0);
                words[k] = (words[k] << sh) | (next >> rest);
            }
        }
    }

    /// Replaces the bits with their two's complement, read as one unsigned
    /// number of `len()` bits with bit `0` most significant.
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
    /// let mut bs = Bitset::<4>::from_bit_str("00110")?;
    /// bs.negate()?;
    /// assert_eq!(bs.to_string(), "11010");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn negate(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.negate_bits();
        Ok(())
    }

    /// Returns a negated copy.
    #[must_use]
    pub fn negated(&self) -> Self {
        let mut out = self.clone();
        out.negate_bits();
        out
    }

    fn negate_bits(&mut self) {
        let len = self.len;
        let words = &mut self.storage[..words_for(len)];
        let last = words.len().wrapping_sub(1);
        let pad = match len % WORD_BITS {
            0 => 0,
            rest => WORD_BITS - rest,
        };

        // Least significant word first; the carry survives only through zeros.
        let mut carry = true;
        for (k, w) in words.iter_mut().enumerate().rev() {
            let sh = if k == last { pad } else { 0 };
            let v = *w >> sh;
            *w = (!v).wrapping_add(Word::from(carry)) << sh;
            carry &= v == 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bitset, WORD_BITS};

    type Bs = Bitset<4>;

    fn bits(s: &str) -> Bs {
        Bs::from_bit_str(s).unwrap()
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let bs = bits("1011 0011 1");
        assert_eq!(bs.flipped().bindigest(), "01001100 0");
        assert_eq!(bs.flipped().flipped(), bs);
    }

    #[test]
    fn test_reflect_spanning_words() {
        let mut bs = Bs::new();
        bs.push(0b1101, 4).unwrap();
        bs.resize(WORD_BITS + 3).unwrap();
        bs.reflect().unwrap();
        assert_eq!(bs.len(), WORD_BITS + 3);
        assert_eq!(bs.last(4).unwrap(), 0b1011);
        assert_eq!(bs.count_ones(), 3);
        assert_eq!(bs.reflected().get(0, 4).unwrap(), 0b1101);
    }

    #[test]
    fn test_reflect_full_words() {
        let mut bs = Bs::new();
        bs.push(1, 1).unwrap();
        bs.resize(2 * WORD_BITS).unwrap();
        bs.reflect().unwrap();
        assert!(bs.test(-1).unwrap());
        assert_eq!(bs.count_ones(), 1);
    }

    #[test]
    fn test_negate_carries_across_words() {
        let mut bs = Bs::new();
        bs.resize(WORD_BITS + 4).unwrap();
        bs.negate().unwrap();
        assert!(bs.none());

        bs.set_bit(-1, true).unwrap();
        bs.negate().unwrap();
        assert!(bs.all());

        let mut bs = bits("1000");
        bs.negate().unwrap();
        assert_eq!(bs.to_string(), "1000");
    }

    #[test]
    fn test_copies_of_frozen_bitset() {
        let mut bs = bits("0011 0");
        bs.freeze();
        assert_eq!(bs.flip(), Err(crate::BitsetError::Frozen));

        let flipped = bs.flipped();
        assert_eq!(flipped.to_string(), "11001");
        assert!(!flipped.is_frozen());
        assert_eq!(bs.reflected().to_string(), "01100");
        assert_eq!(bs.negated().to_string(), "11010");
        assert_eq!(bs.to_string(), "00110");
    }

    #[test]
    fn test_negate_empty() {
        let mut bs = Bs::new();
        bs.negate().unwrap();
        assert!(bs.is_empty());
    }
}
