//! Iterators over the bits, bytes and fixed-width fields of a [`Bitset`].

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{
    Bitset,
    bitset::check_width,
    error::{BitsetError, Result},
    word::{WORD_BITS, Word, bitpos, read_field},
};

/// An iterator over the bits of a [`Bitset`] as `bool`s, from bit `0`.
///
/// Created by [`Bitset::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    words: &'a [Word],
    front: usize,
    back: usize,
}

impl Iter<'_> {
    #[inline]
    fn bit(&self, i: usize) -> bool {
        let (wi, off) = bitpos(i);
        (self.words[wi] >> (WORD_BITS - 1 - off)) & 1 == 1
    }
}

impl Iterator for Iter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        let bit = self.bit(self.front);
        self.front += 1;
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.bit(self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// An iterator over consecutive `width`-bit fields of a [`Bitset`].
///
/// Each field is right-justified; a last field cut short by the end of the
/// bitset is zero-padded at the low end, exactly like [`Bitset::get`].
///
/// Created by [`Bitset::slices`].
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    words: &'a [Word],
    len: usize,
    width: usize,
    front: usize,
    back: usize,
}

impl Iterator for Fields<'_> {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        if self.front == self.back {
            return None;
        }
        let field = read_field(self.words, self.front * self.width, self.width, self.len);
        self.front += 1;
        Some(field)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Fields<'_> {
    fn next_back(&mut self) -> Option<Word> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(read_field(self.words, self.back * self.width, self.width, self.len))
    }
}

impl ExactSizeIterator for Fields<'_> {}
impl FusedIterator for Fields<'_> {}

/// An iterator over the bytes of a [`Bitset`]; the last byte is zero-padded.
///
/// Created by [`Bitset::bytes`].
#[derive(Debug, Clone)]
pub struct Bytes<'a>(Fields<'a>);

impl Iterator for Bytes<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.0.next().map(|b| b as u8)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Bytes<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<u8> {
        self.0.next_back().map(|b| b as u8)
    }
}

impl ExactSizeIterator for Bytes<'_> {}
impl FusedIterator for Bytes<'_> {}

impl<const EXPAND: usize> Bitset<EXPAND> {
    /// Returns an iterator over the bits, from bit `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("101")?;
    /// let bits: Vec<bool> = bs.iter().collect();
    /// assert_eq!(bits, [true, false, true]);
    /// assert_eq!(bs.iter().rev().next(), Some(true));
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: self.as_words(),
            front: 0,
            back: self.len,
        }
    }

    /// Returns an iterator over consecutive `width`-bit fields.
    ///
    /// # Errors
    ///
    /// [`BitsetError::WidthOutOfRange`] unless `1 <= width <= WIDTH_MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("101 110 01")?;
    /// let fields: Vec<usize> = bs.slices(3)?.collect();
    /// assert_eq!(fields, [0b101, 0b110, 0b010]);
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn slices(&self, width: usize) -> Result<Fields<'_>> {
        check_width(width)?;
        if width == 0 {
            return Err(BitsetError::WidthOutOfRange {
                width,
                max: crate::WIDTH_MAX,
            });
        }
        Ok(self.fields(width))
    }

    fn fields(&self, width: usize) -> Fields<'_> {
        Fields {
            words: self.as_words(),
            len: self.len,
            width,
            front: 0,
            back: self.len.div_ceil(width),
        }
    }

    /// Returns an iterator over the bytes.
    #[must_use]
    pub fn bytes(&self) -> Bytes<'_> {
        Bytes(self.fields(8))
    }

    /// Collects the bits into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }
}

impl<'a, const EXPAND: usize> IntoIterator for &'a Bitset<EXPAND> {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
