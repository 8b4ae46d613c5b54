//! Error type shared by every fallible [`Bitset`](crate::Bitset) operation.

use thiserror::Error;

/// Errors reported by bitset operations.
///
/// Every operation validates its arguments before touching the word array,
/// so a returned error never leaves a partially mutated bitset behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitsetError {
    /// A negative index was still negative after adding the bitset length.
    #[error("wrong index (expect -{len} or more, but given {index})")]
    IndexOutOfRange {
        /// The index as given by the caller
        index: isize,
        /// The bitset length the index was corrected against
        len: usize,
    },

    /// A field width outside `0..=max`.
    #[error("wrong bitwidth (expect 0..={max}, but given {width})")]
    WidthOutOfRange {
        /// The width as given by the caller
        width: usize,
        /// The largest accepted width
        max: usize,
    },

    /// The handle was used before it was initialised.
    #[error("not initialized")]
    Uninitialized,

    /// The handle was initialised twice.
    #[error("wrong re-initializing")]
    AlreadyInitialized,

    /// The bitset was frozen with [`Bitset::freeze`](crate::Bitset::freeze).
    #[error("can't modify frozen bitset")]
    Frozen,

    /// A value could not be converted into bits.
    #[error("unsupported conversion: {what}")]
    Unsupported {
        /// What was being converted
        what: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = BitsetError> = core::result::Result<T, E>;
