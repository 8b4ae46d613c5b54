//! Conversion of caller values into bits, for construction and assignment.
//!
//! # Bit strings
//!
//! A bit string holds `'0'` and `'1'` characters. The separators `' '`,
//! `'_'`, `'.'`, `'-'` and `':'` may appear anywhere and are skipped. When a
//! bit string is used as a construction source, loading stops at the first
//! character that is neither a bit nor a separator. Everywhere else such a
//! character is rejected with [`BitsetError::Unsupported`].

use crate::{
    Bitset,
    error::{BitsetError, Result},
    word::{WORD_BITS, Word, copy_bits, read_field, write_field},
};

const SEPARATORS: [char; 5] = [' ', '_', '.', '-', ':'];

/// A value that can be loaded into or spliced into a [`Bitset`].
///
/// Scalars (`Bool`, `Int`) carry no bit count of their own; sequences do.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    /// `true` is all ones, `false` all zeros.
    Bool(bool),
    /// An unsigned integer whose low bits are stored.
    Int(u64),
    /// A bit string, see the [module documentation](self).
    Str(&'a str),
    /// Raw bytes, eight bits each, most significant bit first.
    Bytes(&'a [u8]),
    /// One bit per element.
    Bools(&'a [bool]),
    /// One bit per element; only `0` and `1` are bits.
    Ints(&'a [i64]),
    /// The live bits of another bitset.
    Bits {
        /// Packed words
        words: &'a [Word],
        /// Number of live bits in `words`
        len: usize,
    },
    /// Floating point values have no bit form and are always rejected.
    Float(f64),
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for Value<'_> {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value<'_> {
    fn from(value: u32) -> Self {
        Self::Int(u64::from(value))
    }
}

impl From<u8> for Value<'_> {
    fn from(value: u8) -> Self {
        Self::Int(u64::from(value))
    }
}

impl From<usize> for Value<'_> {
    fn from(value: usize) -> Self {
        Self::Int(value as u64)
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

impl<'a> From<&'a [bool]> for Value<'a> {
    fn from(value: &'a [bool]) -> Self {
        Self::Bools(value)
    }
}

impl<'a> From<&'a [i64]> for Value<'a> {
    fn from(value: &'a [i64]) -> Self {
        Self::Ints(value)
    }
}

impl<'a, const EXPAND: usize> From<&'a Bitset<EXPAND>> for Value<'a> {
    fn from(value: &'a Bitset<EXPAND>) -> Self {
        Self::Bits {
            words: value.as_words(),
            len: value.len,
        }
    }
}

/// Bits of a bit string up to the first unrecognised character.
fn scan_bits(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars()
        .filter(|c| !SEPARATORS.contains(c))
        .map_while(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
}

/// Counts the bits of a bit string, rejecting unrecognised characters.
fn strict_bit_count(s: &str) -> Result<usize> {
    s.chars().try_fold(0, |n, c| match c {
        '0' | '1' => Ok(n + 1),
        c if SEPARATORS.contains(&c) => Ok(n),
        _ => Err(BitsetError::Unsupported {
            what: "character outside a bit string",
        }),
    })
}

fn fold_bits(bits: impl Iterator<Item = bool>) -> Word {
    bits.fold(0, |acc, b| (acc << 1) | Word::from(b))
}

fn ints_valid_prefix(ints: &[i64]) -> Option<usize> {
    ints.iter().position(|&v| v != 0 && v != 1)
}

/// Stores the low `min(len, 64)` bits of `value` from bit `0`, most
/// significant first.
fn write_u64(words: &mut [Word], len: usize, value: u64) {
    let take = len.min(64);
    let value = if take < 64 { value & ((1 << take) - 1) } else { value };
    let mut pos = 0;
    let mut rem = take;
    while rem > 0 {
        let chunk = rem.min(WORD_BITS);
        write_field(words, pos, chunk, (value >> (rem - chunk)) as Word);
        pos += chunk;
        rem -= chunk;
    }
}

impl Value<'_> {
    /// Bit count of a sequence value, `None` for scalars.
    fn bit_len(&self) -> Result<Option<usize>> {
        Ok(match *self {
            Self::Bool(_) | Self::Int(_) => None,
            Self::Str(s) => Some(strict_bit_count(s)?),
            Self::Bytes(b) => Some(b.len() * 8),
            Self::Bools(b) => Some(b.len()),
            Self::Ints(i) => Some(i.len()),
            Self::Bits { len, .. } => Some(len),
            Self::Float(_) => return Err(float_unsupported()),
        })
    }

    /// Folds the value into one word; sequences keep their last
    /// `WORD_BITS` bits.
    fn to_word(self) -> Result<Word> {
        Ok(match self {
            Self::Bool(b) => if b { Word::MAX } else { 0 },
            Self::Int(v) => v as Word,
            Self::Str(s) => {
                strict_bit_count(s)?;
                fold_bits(scan_bits(s))
            }
            Self::Bytes(b) => b.iter().fold(0, |acc: Word, &byte| (acc << 8) | Word::from(byte)),
            Self::Bools(b) => fold_bits(b.iter().copied()),
            Self::Ints(i) => {
                if ints_valid_prefix(i).is_some() {
                    return Err(ints_unsupported());
                }
                fold_bits(i.iter().map(|&v| v == 1))
            }
            Self::Bits { words, len } => {
                let k = len.min(WORD_BITS);
                read_field(words, len - k, k, len)
            }
            Self::Float(_) => return Err(float_unsupported()),
        })
    }
}

const fn float_unsupported() -> BitsetError {
    BitsetError::Unsupported {
        what: "floating point value",
    }
}

const fn ints_unsupported() -> BitsetError {
    BitsetError::Unsupported {
        what: "integer element other than 0 or 1",
    }
}

impl<const EXPAND: usize> Bitset<EXPAND> {
    /// Builds a bitset from `source`.
    ///
    /// With `length == None` the length is inferred: the bit count of a bit
    /// string, eight bits per byte, one bit per array element, or the length
    /// of a source bitset. Integer and boolean sources have no inherent
    /// length and require one.
    ///
    /// With an explicit `length`, exactly that many bits are produced; a
    /// source that runs out is zero-extended.
    ///
    /// - Integers store their low `length` bits, or for `length >= 64` all 64
    ///   bits followed by zeros. `true` loads like `u64::MAX`.
    /// - A bit string stops at its first unrecognised character.
    /// - An integer array stops at its first element other than `0` or `1`,
    ///   and the length is cut to the elements loaded so far.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Unsupported`] for floating point sources and for an
    /// integer or boolean source without a `length`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_source("1011_0011", None)?;
    /// assert_eq!(bs.len(), 8);
    ///
    /// let bs = Bitset::<4>::from_source(0b101u64, Some(5))?;
    /// assert_eq!(bs.to_string(), "00101");
    ///
    /// let bs = Bitset::<4>::from_source(&[1i64, 0, 1, 7, 1][..], None)?;
    /// assert_eq!(bs.to_string(), "101");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn from_source<'a>(source: impl Into<Value<'a>>, length: Option<usize>) -> Result<Self> {
        let mut bs = Self::new();
        match source.into() {
            Value::Bool(b) => {
                let len = length.ok_or(BitsetError::Unsupported {
                    what: "boolean source without a bit length",
                })?;
                bs.load_u64(len, if b { u64::MAX } else { 0 });
            }
            Value::Int(v) => {
                let len = length.ok_or(BitsetError::Unsupported {
                    what: "integer source without a bit length",
                })?;
                bs.load_u64(len, v);
            }
            Value::Str(s) => {
                let len = length.unwrap_or_else(|| scan_bits(s).count());
                bs.load_bits(len, scan_bits(s));
            }
            Value::Bytes(bytes) => bs.load_bytes(length.unwrap_or(bytes.len() * 8), bytes),
            Value::Bools(b) => bs.load_bits(length.unwrap_or(b.len()), b.iter().copied()),
            Value::Ints(ints) => {
                let len = match (length, ints_valid_prefix(ints)) {
                    (Some(n), Some(stop)) => n.min(stop),
                    (Some(n), None) => n,
                    (None, stop) => stop.unwrap_or(ints.len()),
                };
                bs.load_bits(len, ints.iter().map(|&v| v == 1));
            }
            Value::Bits { words, len } => {
                let n = length.unwrap_or(len);
                bs.zero_extend(n);
                copy_bits(&mut bs.storage, 0, words, 0, n.min(len), len);
            }
            Value::Float(_) => return Err(float_unsupported()),
        }
        Ok(bs)
    }

    /// Parses a bit string, inferring the length.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Unsupported`] on any character that is neither a bit
    /// nor a separator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1111:0000")?;
    /// assert_eq!(bs.len(), 8);
    /// assert!(Bitset::<4>::from_bit_str("10x1").is_err());
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn from_bit_str(s: &str) -> Result<Self> {
        let len = strict_bit_count(s)?;
        let mut bs = Self::new();
        bs.load_bits(len, scan_bits(s));
        Ok(bs)
    }

    /// Loads bytes, eight bits each. The inverse of [`digest`](Self::digest)
    /// for lengths that are a multiple of eight.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bs = Self::new();
        bs.load_bytes(bytes.len() * 8, bytes);
        bs
    }

    /// Loads one bit per element.
    #[must_use]
    pub fn from_bools(bits: &[bool]) -> Self {
        let mut bs = Self::new();
        bs.load_bits(bits.len(), bits.iter().copied());
        bs
    }

    /// Loads the low `len` bits of `value`; see [`from_source`](Self::from_source).
    #[must_use]
    pub fn from_int(value: u64, len: usize) -> Self {
        let mut bs = Self::new();
        bs.load_u64(len, value);
        bs
    }

    fn load_u64(&mut self, len: usize, value: u64) {
        self.zero_extend(len);
        write_u64(&mut self.storage, len, value);
    }

    fn load_bits(&mut self, len: usize, bits: impl Iterator<Item = bool>) {
        self.zero_extend(len);
        for (i, bit) in bits.take(len).enumerate() {
            if bit {
                write_field(&mut self.storage, i, 1, 1);
            }
        }
    }

    fn load_bytes(&mut self, len: usize, bytes: &[u8]) {
        self.zero_extend(len);
        for (i, &byte) in bytes.iter().take(len.div_ceil(8)).enumerate() {
            let chunk = (len - i * 8).min(8);
            write_field(&mut self.storage, i * 8, chunk, Word::from(byte >> (8 - chunk)));
        }
    }

    // ========================================================================
    // Assignment
    // ========================================================================

    /// Sets the bit at `index` from `value`.
    ///
    /// Scalars store their lowest bit, so `true` sets and `false` clears.
    /// Sequences store their last bit.
    ///
    /// # Errors
    ///
    /// Same as [`set_bits`](Self::set_bits), plus
    /// [`BitsetError::Unsupported`] for values without a bit form.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let mut bs = Bitset::<4>::from_bit_str("0000")?;
    /// bs.set(1, true)?;
    /// bs.set(-1, 3u64)?;
    /// assert_eq!(bs.to_string(), "0101");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn set<'a>(&mut self, index: isize, value: impl Into<Value<'a>>) -> Result<()> {
        let bit = value.into().to_word()?;
        self.set_bits(index, 1, bit, 1)
    }

    /// Replaces the `width`-bit field at `index` with `value`.
    ///
    /// A scalar fills exactly `width` bits. A sequence replaces the field
    /// with all of its bits, growing or shrinking the bitset accordingly.
    ///
    /// # Errors
    ///
    /// Same as [`splice`](Self::splice).
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let mut bs = Bitset::<4>::from_bit_str("11111111")?;
    /// bs.assign(3, 4, "0000")?;
    /// assert_eq!(bs.to_string(), "11100001");
    ///
    /// bs.assign(0, 3, "01")?;
    /// assert_eq!(bs.to_string(), "0100001");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    pub fn assign<'a>(&mut self, index: isize, width: usize, value: impl Into<Value<'a>>) -> Result<()> {
        let value = value.into();
        let value_width = value.bit_len()?.unwrap_or(width);
        self.splice(index, width, value_width, value)
    }

    /// Replaces the `width`-bit field at `index` with the first
    /// `value_width` bits of `value`.
    ///
    /// Scalars follow [`set_bits`](Self::set_bits) and are limited to
    /// [`WIDTH_MAX`](crate::WIDTH_MAX) bits. Sequences may be any width; a
    /// sequence shorter than `value_width` is padded with zero bits.
    ///
    /// # Errors
    ///
    /// - [`BitsetError::Frozen`] if the bitset is frozen.
    /// - [`BitsetError::IndexOutOfRange`] for a negative index before the start.
    /// - [`BitsetError::WidthOutOfRange`] for scalar widths above `WIDTH_MAX`.
    /// - [`BitsetError::Unsupported`] for floats, bit strings with foreign
    ///   characters, and integer arrays holding anything but `0` and `1`.
    pub fn splice<'a>(&mut self, index: isize, width: usize, value_width: usize, value: impl Into<Value<'a>>) -> Result<()> {
        let value = value.into();
        if value.bit_len()?.is_none() {
            return self.set_bits(index, width, value.to_word()?, value_width);
        }
        if matches!(value, Value::Ints(ints) if ints_valid_prefix(ints).is_some()) {
            return Err(ints_unsupported());
        }

        let src = Self::from_source(value, Some(value_width))?;
        self.ensure_mutable()?;
        let index = self.correct_index(index)?;
        self.prepare_field(index, width, value_width);
        copy_bits(&mut self.storage, index, src.as_words(), 0, value_width, src.len);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Bs = Bitset<4>;

    #[test]
    fn test_lenient_string_source() {
        let bs = Bs::from_source("10 1x111", None).unwrap();
        assert_eq!(bs.to_string(), "101");

        let bs = Bs::from_source("10 1x111", Some(6)).unwrap();
        assert_eq!(bs.to_string(), "101000");
    }

    #[test]
    fn test_integer_source_needs_length() {
        assert!(matches!(
            Bs::from_source(5u64, None),
            Err(BitsetError::Unsupported { .. })
        ));
        assert!(Bs::from_source(true, None).is_err());
    }

    #[test]
    fn test_integer_source_wide() {
        let bs = Bs::from_source(u64::MAX, Some(70)).unwrap();
        assert_eq!(bs.len(), 70);
        assert_eq!(bs.count_ones(), 64);
        assert_eq!(bs.get(64, 6).unwrap(), 0);

        let bs = Bs::from_source(0xffu64, Some(4)).unwrap();
        assert_eq!(bs.to_string(), "1111");
        assert!(Bs::from_source(1u64, Some(0)).unwrap().is_empty());
    }

    #[test]
    fn test_bool_and_int_arrays() {
        let bs = Bs::from_source(&[true, false, true][..], Some(5)).unwrap();
        assert_eq!(bs.to_string(), "10100");

        let bs = Bs::from_source(&[1i64, 1, -1, 1][..], Some(10)).unwrap();
        assert_eq!(bs.to_string(), "11");

        let bs = Bs::from_source(&[1i64, 0][..], Some(4)).unwrap();
        assert_eq!(bs.to_string(), "1000");
    }

    #[test]
    fn test_bitset_source_truncates_and_extends() {
        let src = Bs::from_bit_str("1101").unwrap();
        assert_eq!(Bs::from_source(&src, None).unwrap(), src);
        assert_eq!(Bs::from_source(&src, Some(2)).unwrap().to_string(), "11");
        assert_eq!(Bs::from_source(&src, Some(6)).unwrap().to_string(), "110100");
    }

    #[test]
    fn test_bytes_source() {
        let bs = Bs::from_bytes(&[0xa5, 0x0f]);
        assert_eq!(bs.len(), 16);
        assert_eq!(bs.get(0, 16).unwrap(), 0xa50f);

        let bs = Bs::from_source(&[0xa5u8][..], Some(3)).unwrap();
        assert_eq!(bs.to_string(), "101");
    }

    #[test]
    fn test_float_rejected_everywhere() {
        let mut bs = Bs::from_bit_str("0000").unwrap();
        assert!(Bs::from_source(1.5, None).is_err());
        assert!(bs.set(0, 1.5).is_err());
        assert!(bs.assign(0, 2, 1.5).is_err());
        assert_eq!(bs.to_string(), "0000");
    }

    #[test]
    fn test_strict_string_in_value_position() {
        let mut bs = Bs::from_bit_str("0000").unwrap();
        assert!(bs.assign(0, 2, "1x").is_err());
        bs.assign(0, 2, "1_1").unwrap();
        assert_eq!(bs.to_string(), "1100");
    }

    #[test]
    fn test_splice_sequence_wider_than_word() {
        let mut bs = Bs::from_bit_str("11").unwrap();
        let ones = [true; WORD_BITS + 5];
        bs.assign(1, 0, &ones[..]).unwrap();
        assert_eq!(bs.len(), WORD_BITS + 7);
        assert_eq!(bs.count_ones(), WORD_BITS + 7);

        bs.splice(0, WORD_BITS + 7, 3, &ones[..]).unwrap();
        assert_eq!(bs.to_string(), "111");
    }

    #[test]
    fn test_set_uses_last_bit_of_sequences() {
        let mut bs = Bs::from_bit_str("000").unwrap();
        bs.set(0, "10").unwrap();
        bs.set(1, &[false, true][..]).unwrap();
        bs.set(2, Value::Ints(&[0, 1])).unwrap();
        assert_eq!(bs.to_string(), "011");
        assert!(bs.set(0, Value::Ints(&[2])).is_err());
    }
}
