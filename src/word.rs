//! Mask and shift primitives over packed machine words.
//!
//! Bits are stored most-significant-bit first: logical bit `i` lives in word
//! `i / WORD_BITS` at offset `i % WORD_BITS` counted from the top of the word.

/// The machine word used for packed storage.
pub type Word = usize;

/// Number of bits in a [`Word`] (64 or 32 depending on the target).
pub const WORD_BITS: usize = Word::BITS as usize;

/// Convert bit index to (word index, bit offset from the top of the word)
#[inline(always)]
pub(crate) const fn bitpos(idx: usize) -> (usize, usize) {
    (idx / WORD_BITS, idx % WORD_BITS)
}

/// Number of words needed to hold `bits` bits.
#[inline(always)]
pub(crate) const fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// Word with the low `width` bits set.
#[inline(always)]
pub(crate) const fn low_mask(width: usize) -> Word {
    if width >= WORD_BITS {
        Word::MAX
    } else {
        (1 << width) - 1
    }
}

/// Word with the top `width` bits set.
#[inline(always)]
pub(crate) const fn head_mask(width: usize) -> Word {
    if width == 0 {
        0
    } else if width >= WORD_BITS {
        Word::MAX
    } else {
        Word::MAX << (WORD_BITS - width)
    }
}

/// Mask of the live bits in the last word of a `len`-bit vector.
#[inline(always)]
pub(crate) const fn tail_mask(len: usize) -> Word {
    match len % WORD_BITS {
        0 => Word::MAX,
        rest => head_mask(rest),
    }
}

/// Reads `WORD_BITS` bits starting at stream position `pos`.
///
/// Positions before zero, at or beyond `limit`, or past the end of `words`
/// read as zero, so callers can straddle either end of the vector freely.
pub(crate) fn read_word(words: &[Word], pos: isize, limit: usize) -> Word {
    let at = |wi: isize| -> Word {
        usize::try_from(wi)
            .ok()
            .and_then(|wi| words.get(wi))
            .copied()
            .unwrap_or(0)
    };

    let wi = pos.div_euclid(WORD_BITS as isize);
    let off = pos.rem_euclid(WORD_BITS as isize) as usize;
    let mut word = if off == 0 {
        at(wi)
    } else {
        (at(wi) << off) | (at(wi + 1) >> (WORD_BITS - off))
    };

    let keep = limit as isize - pos;
    if keep < WORD_BITS as isize {
        word &= if keep <= 0 { 0 } else { head_mask(keep as usize) };
    }
    word
}

/// Reads a `width`-bit field at `index`, right-justified.
///
/// Bits at or beyond `limit` read as zero, which left-shifts a truncated
/// field so that its missing low bits are zero.
#[inline]
pub(crate) fn read_field(words: &[Word], index: usize, width: usize, limit: usize) -> Word {
    if width == 0 {
        return 0;
    }
    read_word(words, index as isize, limit) >> (WORD_BITS - width)
}

/// Overwrites the `width`-bit field at `index` with the low bits of `bits`.
///
/// `words` must cover `[index, index + width)`.
pub(crate) fn write_field(words: &mut [Word], index: usize, width: usize, bits: Word) {
    if width == 0 {
        return;
    }
    let bits = bits & low_mask(width);
    let (wi, off) = bitpos(index);
    let end = off + width;

    if end <= WORD_BITS {
        let sh = WORD_BITS - end;
        let mask = low_mask(width) << sh;
        words[wi] = (words[wi] & !mask) | (bits << sh);
    } else {
        // Field straddles a word boundary: high part ends word `wi`, the
        // remaining `spill` bits start word `wi + 1`.
        let spill = end - WORD_BITS;
        let sh = WORD_BITS - spill;
        words[wi] = (words[wi] & !low_mask(width - spill)) | (bits >> spill);
        words[wi + 1] = (words[wi + 1] & !(low_mask(spill) << sh)) | (bits << sh);
    }
}

/// Copies `count` bits from `src` at `from` into `dst` at `at`.
///
/// Source bits at or beyond `limit` are copied as zero. `dst` must cover
/// `[at, at + count)`.
pub(crate) fn copy_bits(dst: &mut [Word], at: usize, src: &[Word], from: usize, count: usize, limit: usize) {
    let mut done = 0;
    while done < count {
        let chunk = (count - done).min(WORD_BITS);
        let bits = read_field(src, from + done, chunk, limit);
        write_field(dst, at + done, chunk, bits);
        done += chunk;
    }
}
