//! `Bitset` struct and core implementation.

use crate::{
    error::{BitsetError, Result},
    storage::{DEFAULT_EXPAND_UNIT, EMBED_WORDS, Storage},
    word::{WORD_BITS, Word, bitpos, copy_bits, head_mask, read_field, tail_mask, words_for, write_field},
};

/// A variable-length, bit-packed vector with arbitrary-width field access.
///
/// # Overview
///
/// `Bitset` stores a sequence of `len()` bits packed into machine words. Bit
/// `0` is the most significant bit of the first word, so reading a field
/// yields the bits in the order they were written, like a register dump.
/// Fields of up to [`WORD_BITS`] bits can be read and written at any offset,
/// and fields can be spliced in or cut out, shifting every later bit.
///
/// # Storage Strategy
///
/// - **Embedded**: up to [`EMBED_BITS`](crate::EMBED_BITS) bits live inside the struct
/// - **Heap**: larger bitsets move to a heap buffer that grows in batches of
///   `EXPAND` words
/// - [`shrink`](Self::shrink) moves the words back inline when they fit
///
/// # Examples
///
/// ```
/// use packed_bitset::Bitset;
///
/// let mut bs = Bitset::<4>::from_bit_str("1011_0011")?;
/// assert_eq!(bs.len(), 8);
/// assert_eq!(bs.get(0, 4)?, 0b1011);
///
/// // splice a 2-bit field over a 4-bit one
/// bs.set_bits(0, 4, 0b11, 2)?;
/// assert_eq!(bs.to_string(), "110011");
/// # Ok::<(), packed_bitset::BitsetError>(())
/// ```
pub struct Bitset<const EXPAND: usize = DEFAULT_EXPAND_UNIT> {
    pub(crate) storage: Storage,
    pub(crate) len: usize,
    pub(crate) frozen: bool,
}

/// Largest field width accepted by [`Bitset::get`] and [`Bitset::set_bits`].
pub const WIDTH_MAX: usize = WORD_BITS;

#[inline]
pub(crate) fn check_width(width: usize) -> Result<()> {
    if width > WIDTH_MAX {
        return Err(BitsetError::WidthOutOfRange {
            width,
            max: WIDTH_MAX,
        });
    }
    Ok(())
}

impl<const EXPAND: usize> Bitset<EXPAND> {
    /// Creates a new empty bitset with embedded storage.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::{Bitset, EMBED_BITS};
    /// let bs = Bitset::<4>::new();
    /// assert_eq!(bs.len(), 0);
    /// assert_eq!(bs.capacity(), EMBED_BITS);
    /// assert!(!bs.is_heap());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(EXPAND > 0, "expansion unit must be at least one word") };
        Self {
            storage: Storage::Embedded([0; EMBED_WORDS]),
            len: 0,
            frozen: false,
        }
    }

    /// Creates an empty bitset able to hold at least `bits` bits without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::with_capacity(1000);
    /// assert!(bs.is_heap());
    /// assert!(bs.capacity() >= 1000);
    /// assert_eq!(bs.len(), 0);
    /// ```
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        let mut bs = Self::new();
        bs.storage.ensure_capacity(bits, EXPAND);
        bs
    }

    /// Returns the number of live bits.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bitset holds no bits.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bits that can be held without reallocation.
    ///
    /// This is [`EMBED_BITS`](crate::EMBED_BITS) while the words are embedded and the heap
    /// buffer size in bits afterwards.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity_bits()
    }

    /// Returns `true` if the words live on the heap.
    #[must_use]
    #[inline(always)]
    pub const fn is_heap(&self) -> bool {
        self.storage.is_heap()
    }

    /// Returns the words holding the live bits.
    ///
    /// Bits of the last word at positions `>= len()` are padding and may hold
    /// any value.
    #[must_use]
    #[inline]
    pub fn as_words(&self) -> &[Word] {
        &self.storage[..words_for(self.len)]
    }

    /// Marks the bitset immutable. Every later mutation fails with
    /// [`BitsetError::Frozen`].
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns `true` if [`freeze`](Self::freeze) was called.
    #[must_use]
    #[inline(always)]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[inline]
    pub(crate) fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            log::debug!("bitset: rejected mutation of frozen bitset ({} bits)", self.len);
            return Err(BitsetError::Frozen);
        }
        Ok(())
    }

    /// Maps a possibly negative index onto `0..`, counting negative indices
    /// back from `len()`.
    pub(crate) fn correct_index(&self, index: isize) -> Result<usize> {
        if index >= 0 {
            return Ok(index.unsigned_abs());
        }
        let back = index.unsigned_abs();
        self.len
            .checked_sub(back)
            .ok_or(BitsetError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    /// Grows the bitset to `new_len` bits, zeroing every new bit.
    pub(crate) fn zero_extend(&mut self, new_len: usize) {
        if new_len <= self.len {
            return;
        }
        self.storage.ensure_capacity(new_len, EXPAND);

        let (wi, off) = bitpos(self.len);
        let words = &mut self.storage[..words_for(new_len)];
        let start = if off == 0 {
            wi
        } else {
            words[wi] &= head_mask(off);
            wi + 1
        };
        words[start..].fill(0);
        self.len = new_len;
    }

    /// Drops every bit at or beyond `new_len`, zeroing the released words.
    pub(crate) fn truncate_to(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let keep = words_for(new_len);
        let words = &mut self.storage[..words_for(self.len)];
        if new_len % WORD_BITS != 0 {
            words[keep - 1] &= tail_mask(new_len);
        }
        words[keep..].fill(0);
        self.len = new_len;
    }

    // ========================================================================
    // Capacity Control
    // ========================================================================

    /// Reserves capacity for at least `bits` bits in total.
    ///
    /// Heap growth happens in batches of `EXPAND` words, never one word at a
    /// time.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`] if the bitset is frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let mut bs = Bitset::<4>::new();
    /// bs.reserve(300)?;
    /// assert!(bs.capacity() >= 300);
    /// assert!(bs.is_heap());
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn reserve(&mut self, bits: usize) -> Result<()> {
        self.ensure_mutable()?;
        self.storage.ensure_capacity(bits, EXPAND);
        Ok(())
    }

    /// Releases unused heap capacity.
    ///
    /// Moves the words back to embedded storage when `len()` fits inline.
    /// Growth never shrinks implicitly; this is the only way back.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`] if the bitset is frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let mut bs = Bitset::<4>::with_capacity(1000);
    /// bs.resize(10)?;
    /// bs.shrink()?;
    /// assert!(!bs.is_heap());
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn shrink(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.storage.shrink_to_fit(self.len, EXPAND);
        Ok(())
    }

    /// Resizes the bitset to exactly `new_len` bits.
    ///
    /// Growth appends zero bits; truncation drops the bits at the end.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`] if the bitset is frozen.
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        self.ensure_mutable()?;
        if new_len >= self.len {
            self.zero_extend(new_len);
        } else {
            self.truncate_to(new_len);
        }
        Ok(())
    }

    /// Sets every live bit to `value`.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`] if the bitset is frozen.
    pub fn fill(&mut self, value: bool) -> Result<()> {
        self.ensure_mutable()?;
        let len = self.len;
        let bits = if value { Word::MAX } else { 0 };
        if let Some((last, rest)) = self.storage[..words_for(len)].split_last_mut() {
            rest.fill(bits);
            *last = bits & tail_mask(len);
        }
        Ok(())
    }

    /// Removes every bit. The capacity is kept.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`] if the bitset is frozen.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.storage[..words_for(self.len)].fill(0);
        self.len = 0;
        Ok(())
    }

    // ========================================================================
    // Field Access
    // ========================================================================

    /// Reads the `width`-bit field starting at `index`.
    ///
    /// The first bit read becomes the most significant bit of the result.
    /// A negative `index` counts back from `len()`. A field reaching past the
    /// end is read as if the bitset were padded with zero bits, and a field
    /// starting at or past the end reads as `0`.
    ///
    /// # Errors
    ///
    /// - [`BitsetError::IndexOutOfRange`] if a negative `index` is still
    ///   negative after adding `len()`.
    /// - [`BitsetError::WidthOutOfRange`] if `width > WIDTH_MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1011 0011")?;
    /// assert_eq!(bs.get(0, 4)?, 0b1011);
    /// assert_eq!(bs.get(-2, 2)?, 0b11);
    /// assert_eq!(bs.get(6, 4)?, 0b1100); // zero-padded past the end
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn get(&self, index: isize, width: usize) -> Result<Word> {
        let index = self.correct_index(index)?;
        check_width(width)?;
        if index >= self.len {
            return Ok(0);
        }
        Ok(read_field(&self.storage, index, width, self.len))
    }

    /// Returns the bit at `index`.
    ///
    /// # Errors
    ///
    /// [`BitsetError::IndexOutOfRange`] for a negative index before the start.
    pub fn test(&self, index: isize) -> Result<bool> {
        Ok(self.get(index, 1)? != 0)
    }

    /// Writes `value` into the field `[index, index + width)`.
    ///
    /// The low `value_width` bits of `value` are stored. When
    /// `value_width == width` the field is overwritten in place. Otherwise the
    /// field is first resized to `value_width` bits, shifting every later bit,
    /// so the length changes by `value_width - width`. Writing past the end
    /// grows the bitset with zero bits first.
    ///
    /// # Errors
    ///
    /// - [`BitsetError::Frozen`] if the bitset is frozen.
    /// - [`BitsetError::IndexOutOfRange`] for a negative index before the start.
    /// - [`BitsetError::WidthOutOfRange`] if either width exceeds `WIDTH_MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let mut bs = Bitset::<4>::from_bit_str("11111111")?;
    /// bs.set_bits(3, 4, 0b0000, 4)?;
    /// assert_eq!(bs.to_string(), "11100001");
    ///
    /// // insert three bits without removing any
    /// bs.set_bits(0, 0, 0b101, 3)?;
    /// assert_eq!(bs.len(), 11);
    /// assert_eq!(bs.get(0, 3)?, 0b101);
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn set_bits(&mut self, index: isize, width: usize, value: Word, value_width: usize) -> Result<()> {
        self.ensure_mutable()?;
        let index = self.correct_index(index)?;
        check_width(width)?;
        check_width(value_width)?;

        self.prepare_field(index, width, value_width);
        write_field(&mut self.storage, index, value_width, value);
        Ok(())
    }

    /// Sets the bit at `index` to `value`, growing the bitset if needed.
    ///
    /// # Errors
    ///
    /// Same as [`set_bits`](Self::set_bits).
    pub fn set_bit(&mut self, index: isize, value: bool) -> Result<()> {
        self.set_bits(index, 1, Word::from(value), 1)
    }

    /// Resizes the field `[index, index + width)` to `value_width` bits and
    /// makes sure the bitset covers it.
    /// Only the live part of the field takes part in the resize.
    pub(crate) fn prepare_field(&mut self, index: usize, width: usize, value_width: usize) {
        let width = width.min(self.len.saturating_sub(index));
        if value_width < width {
            self.remove_bits(index, width - value_width);
        } else {
            self.insert_bits(index, value_width - width);
        }
        self.zero_extend(index + value_width);
    }

    // ========================================================================
    // Sequence Operations
    // ========================================================================

    /// Appends the low `width` bits of `value`.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`], or [`BitsetError::WidthOutOfRange`] if
    /// `width > WIDTH_MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let mut bs = Bitset::<4>::new();
    /// bs.push(20, 6)?;
    /// bs.push(0x13, 7)?;
    /// assert_eq!(bs.len(), 13);
    /// assert_eq!(bs.get(0, 6)?, 20);
    /// assert_eq!(bs.pop(7)?, 0x13);
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn push(&mut self, value: Word, width: usize) -> Result<()> {
        let end = self.len as isize;
        self.set_bits(end, 0, value, width)
    }

    /// Removes the last `width` bits and returns them.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`], [`BitsetError::WidthOutOfRange`], or
    /// [`BitsetError::IndexOutOfRange`] if fewer than `width` bits are held.
    pub fn pop(&mut self, width: usize) -> Result<Word> {
        let value = self.last(width)?;
        self.ensure_mutable()?;
        self.truncate_to(self.len - width);
        Ok(value)
    }

    /// Prepends the low `width` bits of `value`.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`], or [`BitsetError::WidthOutOfRange`].
    pub fn unshift(&mut self, value: Word, width: usize) -> Result<()> {
        self.set_bits(0, 0, value, width)
    }

    /// Removes the first `width` bits and returns them.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`], [`BitsetError::WidthOutOfRange`], or
    /// [`BitsetError::IndexOutOfRange`] if fewer than `width` bits are held.
    pub fn shift(&mut self, width: usize) -> Result<Word> {
        let value = self.first(width)?;
        self.ensure_mutable()?;
        self.remove_bits(0, width);
        Ok(value)
    }

    /// Reads the first `width` bits.
    ///
    /// # Errors
    ///
    /// [`BitsetError::WidthOutOfRange`], or
    /// [`BitsetError::IndexOutOfRange`] if fewer than `width` bits are held.
    pub fn first(&self, width: usize) -> Result<Word> {
        self.check_held(width)?;
        self.get(0, width)
    }

    /// Reads the last `width` bits.
    ///
    /// # Errors
    ///
    /// [`BitsetError::WidthOutOfRange`], or
    /// [`BitsetError::IndexOutOfRange`] if fewer than `width` bits are held.
    pub fn last(&self, width: usize) -> Result<Word> {
        self.check_held(width)?;
        self.get((self.len - width) as isize, width)
    }

    fn check_held(&self, width: usize) -> Result<()> {
        check_width(width)?;
        if width > self.len {
            return Err(BitsetError::IndexOutOfRange {
                index: self.len as isize - width as isize,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Removes `width` bits starting at `index`, closing the gap.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`], or [`BitsetError::IndexOutOfRange`] for a
    /// negative index before the start.
    pub fn delete(&mut self, index: isize, width: usize) -> Result<()> {
        self.ensure_mutable()?;
        let index = self.correct_index(index)?;
        self.remove_bits(index, width);
        Ok(())
    }

    /// Reads the byte `[index * 8, index * 8 + 8)`. Bytes past the end,
    /// including those beyond any addressable bit, read as zero.
    #[must_use]
    pub fn get_byte(&self, index: usize) -> u8 {
        match index.checked_mul(8) {
            Some(at) if at < self.len => read_field(&self.storage, at, 8, self.len) as u8,
            _ => 0,
        }
    }

    /// Overwrites the byte `[index * 8, index * 8 + 8)`.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`] if the bitset is frozen, or
    /// [`BitsetError::IndexOutOfRange`] if the first bit of the byte is not
    /// addressable as an `isize`.
    pub fn set_byte(&mut self, index: usize, byte: u8) -> Result<()> {
        self.ensure_mutable()?;
        let at = index
            .checked_mul(8)
            .and_then(|at| isize::try_from(at).ok())
            .ok_or(BitsetError::IndexOutOfRange {
                index: isize::MAX,
                len: self.len,
            })?;
        self.set_bits(at, 8, Word::from(byte), 8)
    }

    /// Appends every bit of `other`.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Frozen`] if the bitset is frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let mut a = Bitset::<4>::from_bit_str("101")?;
    /// let b = Bitset::<4>::from_bit_str("0011")?;
    /// a.concat(&b)?;
    /// assert_eq!(a.to_string(), "1010011");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn concat<const F: usize>(&mut self, other: &Bitset<F>) -> Result<()> {
        self.ensure_mutable()?;
        let at = self.len;
        self.zero_extend(at + other.len);
        copy_bits(&mut self.storage, at, other.as_words(), 0, other.len, other.len);
        Ok(())
    }

    /// Copies the bits `[index, index + width)` into a new bitset of
    /// `width` bits; bits past the end are zero.
    ///
    /// # Errors
    ///
    /// [`BitsetError::IndexOutOfRange`] for a negative index before the start.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1011 0011")?;
    /// let sub = bs.subset(2, 4)?;
    /// assert_eq!(sub.to_string(), "1100");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn subset(&self, index: isize, width: usize) -> Result<Self> {
        let index = self.correct_index(index)?;
        let mut out = Self::new();
        out.zero_extend(width);
        if index < self.len {
            let count = width.min(self.len - index);
            copy_bits(&mut out.storage, 0, self.as_words(), index, count, self.len);
        }
        Ok(out)
    }
}

impl<const EXPAND: usize> Default for Bitset<EXPAND> {
    fn default() -> Self {
        Self::new()
    }
}
