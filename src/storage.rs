//! Internal storage representation and capacity management for the bitset.

use alloc::{boxed::Box, vec::Vec};
use core::ops::{Deref, DerefMut};

use crate::word::{WORD_BITS, Word, words_for};

/// Number of words that can be stored inline
pub(crate) const EMBED_WORDS: usize = 3;

/// Number of bits that can be stored inline (192 on 64-bit targets, 96 on
/// 32-bit targets).
pub const EMBED_BITS: usize = EMBED_WORDS * WORD_BITS;

/// Default heap growth batch, in words.
pub const DEFAULT_EXPAND_UNIT: usize = 4;

pub(crate) type EmbeddedWords = [Word; EMBED_WORDS];

/// Rounds `bits` up to a whole number of `expand`-word batches, in words.
#[inline(always)]
pub(crate) const fn batch_words(bits: usize, expand: usize) -> usize {
    bits.div_ceil(WORD_BITS * expand) * expand
}

/// Storage for the packed words of a bitset.
///
/// The embedded array is used until the bitset needs more than
/// [`EMBED_BITS`] bits, after which the words move to a heap buffer whose
/// length is the capacity in words. Every word of the heap buffer is
/// initialised; growth zero-fills the new words.
///
/// Mode transitions only happen through [`ensure_capacity`],
/// [`shrink_to_fit`] and [`duplicate`]; any slice obtained through `Deref`
/// must be re-borrowed after one of them.
///
/// [`ensure_capacity`]: Storage::ensure_capacity
/// [`shrink_to_fit`]: Storage::shrink_to_fit
/// [`duplicate`]: Storage::duplicate
#[derive(Debug)]
pub(crate) enum Storage {
    /// Inline words
    Embedded(EmbeddedWords),
    /// Heap-allocated words
    Heap(Box<[Word]>),
}

impl Default for Storage {
    fn default() -> Self {
        Self::Embedded([0; EMBED_WORDS])
    }
}

impl Storage {
    /// Returns `true` if the words live on the heap.
    #[inline(always)]
    pub(crate) const fn is_heap(&self) -> bool {
        matches!(self, Self::Heap(_))
    }

    /// Capacity in bits.
    #[inline(always)]
    pub(crate) fn capacity_bits(&self) -> usize {
        match self {
            Self::Embedded(_) => EMBED_BITS,
            Self::Heap(words) => words.len() * WORD_BITS,
        }
    }

    /// Makes room for at least `min_bits` bits.
    ///
    /// No-op when the current buffer already fits. Otherwise the embedded
    /// words are promoted to a heap buffer, or the heap buffer is grown, to
    /// the next multiple of `expand` words. Existing words are preserved and
    /// new words are zero.
    pub(crate) fn ensure_capacity(&mut self, min_bits: usize, expand: usize) {
        if min_bits <= self.capacity_bits() {
            return;
        }

        let words = batch_words(min_bits, expand);
        match self {
            Self::Embedded(array) => {
                log::trace!("bitset: promoting embedded storage to {words} heap words");
                let mut vec = Vec::with_capacity(words);
                vec.extend_from_slice(array);
                vec.resize(words, 0);
                *self = Self::Heap(vec.into_boxed_slice());
            }
            Self::Heap(heap) => {
                log::trace!("bitset: growing heap storage {} -> {words} words", heap.len());
                let mut vec = core::mem::take(heap).into_vec();
                vec.resize(words, 0);
                *heap = vec.into_boxed_slice();
            }
        }
    }

    /// Releases unused capacity for a bitset of `len` bits.
    ///
    /// Demotes to embedded storage when `len` fits inline; otherwise trims the
    /// heap buffer to the rounded-up word count if at least one `expand`
    /// batch is unused.
    pub(crate) fn shrink_to_fit(&mut self, len: usize, expand: usize) {
        let Self::Heap(heap) = self else {
            return;
        };

        if len <= EMBED_BITS {
            log::trace!("bitset: demoting {} heap words to embedded storage", heap.len());
            let mut array = [0; EMBED_WORDS];
            let n = heap.len().min(EMBED_WORDS);
            array[..n].copy_from_slice(&heap[..n]);
            *self = Self::Embedded(array);
            return;
        }

        let used = words_for(len);
        if heap.len() - used >= expand {
            let words = used.div_ceil(expand) * expand;
            log::trace!("bitset: shrinking heap storage {} -> {words} words", heap.len());
            let mut vec = core::mem::take(heap).into_vec();
            vec.truncate(words);
            vec.shrink_to_fit();
            *heap = vec.into_boxed_slice();
        }
    }

    /// Deep copy sized for `len` live bits.
    ///
    /// The copy is embedded when `len` fits inline, otherwise it gets a heap
    /// buffer of the minimal batch-rounded size.
    pub(crate) fn duplicate(&self, len: usize, expand: usize) -> Self {
        if len <= EMBED_BITS {
            let mut array = [0; EMBED_WORDS];
            let n = self.len().min(EMBED_WORDS);
            array[..n].copy_from_slice(&self[..n]);
            return Self::Embedded(array);
        }

        let words = batch_words(len, expand);
        let mut vec = Vec::with_capacity(words);
        vec.extend_from_slice(&self[..words.min(self.len())]);
        vec.resize(words, 0);
        Self::Heap(vec.into_boxed_slice())
    }
}

impl Deref for Storage {
    type Target = [Word];

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Embedded(array) => array,
            Self::Heap(words) => words,
        }
    }
}

impl DerefMut for Storage {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Embedded(array) => array,
            Self::Heap(words) => words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fits_without_promotion() {
        let mut storage = Storage::default();
        storage.ensure_capacity(EMBED_BITS, DEFAULT_EXPAND_UNIT);
        assert!(!storage.is_heap());
        assert_eq!(storage.capacity_bits(), EMBED_BITS);
    }

    #[test]
    fn test_promotion_preserves_words_and_zero_fills() {
        let mut storage = Storage::Embedded([1, 2, 3]);
        storage.ensure_capacity(EMBED_BITS + 1, DEFAULT_EXPAND_UNIT);
        assert!(storage.is_heap());
        assert_eq!(storage.len(), DEFAULT_EXPAND_UNIT);
        assert_eq!(&storage[..], &[1, 2, 3, 0]);
    }

    #[test]
    fn test_growth_is_batched() {
        let mut storage = Storage::default();
        storage.ensure_capacity(EMBED_BITS + 1, 4);
        storage.ensure_capacity(5 * WORD_BITS, 4);
        assert_eq!(storage.len(), 8);
        assert!(storage.iter().all(|&w| w == 0));
    }

    #[test]
    fn test_shrink_demotes_and_trims() {
        let mut storage = Storage::default();
        storage.ensure_capacity(20 * WORD_BITS, 4);
        storage[0] = 7;
        storage.shrink_to_fit(5 * WORD_BITS, 4);
        assert_eq!(storage.len(), 8);
        assert_eq!(storage[0], 7);

        // slack below one batch is kept
        storage.shrink_to_fit(5 * WORD_BITS, 4);
        assert_eq!(storage.len(), 8);

        storage.shrink_to_fit(WORD_BITS, 4);
        assert!(!storage.is_heap());
        assert_eq!(storage[0], 7);
    }

    #[test]
    fn test_duplicate_picks_mode_by_length() {
        let mut storage = Storage::default();
        storage.ensure_capacity(10 * WORD_BITS, 4);
        storage[1] = 9;

        let small = storage.duplicate(2 * WORD_BITS, 4);
        assert!(!small.is_heap());
        assert_eq!(small[1], 9);

        let large = storage.duplicate(5 * WORD_BITS, 4);
        assert!(large.is_heap());
        assert_eq!(large.len(), 8);
        assert_eq!(large[1], 9);
    }
}
