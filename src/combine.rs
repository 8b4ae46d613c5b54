//! Bitwise combinators between two bitsets of possibly different lengths.
//!
//! The `msb_*` family aligns both operands at bit `0`; the `lsb_*` family
//! aligns their last bits. Either way the shorter operand is treated as if
//! it were padded with zero bits, and the receiver ends up with the longer
//! of the two lengths.

use crate::{
    Bitset,
    error::Result,
    word::{WORD_BITS, Word, read_word, words_for},
};

/// A word-wise boolean operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `a | b`
    Or,
    /// `!(a | b)`
    Nor,
    /// `a & b`
    And,
    /// `!(a & b)`
    Nand,
    /// `a ^ b`
    Xor,
    /// `!(a ^ b)`
    Xnor,
}

impl Op {
    /// Applies the operator to a pair of words.
    #[inline(always)]
    #[must_use]
    pub const fn apply(self, a: Word, b: Word) -> Word {
        match self {
            Self::Or => a | b,
            Self::Nor => !(a | b),
            Self::And => a & b,
            Self::Nand => !(a & b),
            Self::Xor => a ^ b,
            Self::Xnor => !(a ^ b),
        }
    }
}

impl<const EXPAND: usize> Bitset<EXPAND> {
    /// Combines `other` into `self` with both operands aligned at bit `0`.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`](crate::BitsetError::Frozen) if the bitset is
    /// frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::{Bitset, Op};
    /// let mut a = Bitset::<4>::from_bit_str("1100")?;
    /// let b = Bitset::<4>::from_bit_str("101010")?;
    /// a.msb_operate(&b, Op::Xor)?;
    /// assert_eq!(a.to_string(), "011010");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn msb_operate<const F: usize>(&mut self, other: &Bitset<F>, op: Op) -> Result<()> {
        self.ensure_mutable()?;
        self.msb_combine(other.as_words(), other.len, op);
        Ok(())
    }

    /// Combines `other` into `self` with both operands aligned at their last
    /// bit.
    ///
    /// A shorter receiver is first extended with zero bits at the front.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`](crate::BitsetError::Frozen) if the bitset is
    /// frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::{Bitset, Op};
    /// let mut a = Bitset::<4>::from_bit_str("11")?;
    /// let b = Bitset::<4>::from_bit_str("1001")?;
    /// a.lsb_operate(&b, Op::Or)?;
    /// assert_eq!(a.to_string(), "1011");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn lsb_operate<const F: usize>(&mut self, other: &Bitset<F>, op: Op) -> Result<()> {
        self.ensure_mutable()?;
        self.lsb_combine(other.as_words(), other.len, op);
        Ok(())
    }

    pub(crate) fn msb_combine(&mut self, other: &[Word], other_len: usize, op: Op) {
        self.zero_extend(other_len);
        for (k, w) in self.storage[..words_for(self.len)].iter_mut().enumerate() {
            let b = read_word(other, (k * WORD_BITS) as isize, other_len);
            *w = op.apply(*w, b);
        }
    }

    pub(crate) fn lsb_combine(&mut self, other: &[Word], other_len: usize, op: Op) {
        if self.len < other_len {
            self.insert_bits(0, other_len - self.len);
        }
        let pad = (self.len - other_len) as isize;
        for (k, w) in self.storage[..words_for(self.len)].iter_mut().enumerate() {
            let b = read_word(other, (k * WORD_BITS) as isize - pad, other_len);
            *w = op.apply(*w, b);
        }
    }

    /// Counts the positions at which `self` and `other` differ, with both
    /// aligned at bit `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let a = Bitset::<4>::from_bit_str("1011")?;
    /// let b = Bitset::<4>::from_bit_str("100110")?;
    /// assert_eq!(a.hamming(&b), 2);
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[must_use]
    pub fn hamming<const F: usize>(&self, other: &Bitset<F>) -> usize {
        (0..words_for(self.len.max(other.len)))
            .map(|k| {
                let pos = (k * WORD_BITS) as isize;
                let a = read_word(self.as_words(), pos, self.len);
                let b = read_word(other.as_words(), pos, other.len);
                (a ^ b).count_ones() as usize
            })
            .sum()
    }
}

macro_rules! combinators {
    ($($msb:ident $lsb:ident => $op:ident, $sym:literal;)*) => {
        impl<const EXPAND: usize> Bitset<EXPAND> {
            $(
                #[doc = concat!("`self = self ", $sym, " other`, aligned at bit `0`.")]
                ///
                /// # Errors
                ///
                /// [`BitsetError::Frozen`](crate::BitsetError::Frozen) if the
                /// bitset is frozen.
                #[inline]
                pub fn $msb<const F: usize>(&mut self, other: &Bitset<F>) -> Result<()> {
                    self.msb_operate(other, Op::$op)
                }

                #[doc = concat!("`self = self ", $sym, " other`, aligned at the last bit.")]
                ///
                /// # Errors
                ///
                /// [`BitsetError::Frozen`](crate::BitsetError::Frozen) if the
                /// bitset is frozen.
                #[inline]
                pub fn $lsb<const F: usize>(&mut self, other: &Bitset<F>) -> Result<()> {
                    self.lsb_operate(other, Op::$op)
                }
            )*
        }
    };
}

combinators! {
    msb_or lsb_or => Or, "|";
    msb_nor lsb_nor => Nor, "NOR";
    msb_and lsb_and => And, "&";
    msb_nand lsb_nand => Nand, "NAND";
    msb_xor lsb_xor => Xor, "^";
    msb_xnor lsb_xnor => Xnor, "XNOR";
}
