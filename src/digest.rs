//! CRC hashing and text/byte renderings of the bits.
//!
//! The hash is a non-reflected CRC fed with the live bits most significant
//! first, processed four bits at a time. On 64-bit targets it uses the
//! ECMA-182 polynomial (the CRC-64/WE parameters), on 32-bit targets the
//! Castagnoli polynomial. The register starts at all ones and the result is
//! complemented.

use alloc::{string::String, vec::Vec};

use crate::{
    Bitset,
    word::{WORD_BITS, Word, read_field},
};

#[cfg(target_pointer_width = "64")]
const CRC_POLY: Word = 0x42f0_e1eb_a9ea_3693;
#[cfg(not(target_pointer_width = "64"))]
const CRC_POLY: Word = 0x1edc_6f41;

const fn crc_table() -> [Word; 16] {
    let mut table = [0; 16];
    let mut i = 0;
    while i < 16 {
        let mut n = (i as Word) << (WORD_BITS - 4);
        let mut step = 0;
        while step < 4 {
            let top = n >> (WORD_BITS - 1);
            n = (n << 1) ^ if top != 0 { CRC_POLY } else { 0 };
            step += 1;
        }
        table[i] = n;
        i += 1;
    }
    table
}

static CRC_TABLE: [Word; 16] = crc_table();

/// Feeds the low `bits` (1..=4) bits of `n` into the register.
#[inline(always)]
fn crc_feed(crc: Word, n: Word, bits: usize) -> Word {
    let index = ((crc >> (WORD_BITS - bits)) ^ n) & 0xf;
    (crc << bits) ^ CRC_TABLE[index]
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

impl<const EXPAND: usize> Bitset<EXPAND> {
    /// Computes the CRC of the live bits.
    ///
    /// Equal bitsets hash equally regardless of capacity or storage mode.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let a = Bitset::<4>::from_bit_str("1011")?;
    /// let mut b = Bitset::<1>::with_capacity(1000);
    /// b.push(0b1011, 4)?;
    /// assert_eq!(a.crc(), b.crc());
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[must_use]
    pub fn crc(&self) -> Word {
        let mut crc = Word::MAX;
        let mut left = self.len;
        for &word in self.as_words() {
            let mut n = word;
            let mut bits = left.min(WORD_BITS);
            left -= bits;
            while bits >= 4 {
                crc = crc_feed(crc, n >> (WORD_BITS - 4), 4);
                n <<= 4;
                bits -= 4;
            }
            if bits > 0 {
                crc = crc_feed(crc, n >> (WORD_BITS - bits), bits);
            }
        }
        !crc
    }

    /// Packs the bits into bytes, eight per byte with bit `0` as the most
    /// significant bit of the first byte. The last byte is zero-padded.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1011 0011 1")?;
    /// assert_eq!(bs.digest(), [0xb3, 0x80]);
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[must_use]
    pub fn digest(&self) -> Vec<u8> {
        self.bytes().collect()
    }

    /// Renders the bits as lowercase hexadecimal, one digit per four bits.
    /// The last digit is zero-padded.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1011 0011 1")?;
    /// assert_eq!(bs.hexdigest(), "b38");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[must_use]
    pub fn hexdigest(&self) -> String {
        let digits = self.len.div_ceil(4);
        let words = self.as_words();
        (0..digits)
            .map(|i| {
                let nibble = read_field(words, i * 4, 4, self.len);
                char::from(HEX_DIGITS[nibble])
            })
            .collect()
    }

    /// Renders one `'0'`/`'1'` per bit, with a space before every eighth bit
    /// and a second space before every thirty-second.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1011 0011 1")?;
    /// assert_eq!(bs.bindigest(), "10110011 1");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[must_use]
    pub fn bindigest(&self) -> String {
        let len = self.len;
        let mut out = String::with_capacity(len + len.saturating_sub(1) / 8 + len.saturating_sub(1) / 32);
        for (i, bit) in self.iter().enumerate() {
            if i > 0 && i % 8 == 0 {
                out.push(' ');
                if i % 32 == 0 {
                    out.push(' ');
                }
            }
            out.push(if bit { '1' } else { '0' });
        }
        out
    }
}
