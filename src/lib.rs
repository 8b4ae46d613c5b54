//! A variable-length, most-significant-bit-first packed bitset.
//!
//! This crate provides [`Bitset`], a growable vector of bits packed into
//! machine words. Bit `0` is the most significant bit of the first word, so a
//! field read with [`Bitset::get`] comes back in the order its bits were
//! written. On top of plain bit access the bitset supports:
//!
//! - **Field access** of up to [`WIDTH_MAX`] bits at any offset, including
//!   splicing a field of a different width in place
//! - **Sliding**: inserting zero bits or removing bits anywhere
//! - **Combinators** between bitsets of different lengths, aligned either at
//!   the first bit (`msb_*`) or at the last bit (`lsb_*`)
//! - **Transforms**: flip, bit reversal and two's-complement negation
//! - **Queries**: popcount, leading/trailing zeros, parity, all/any/none
//! - **Digests**: a CRC hash plus byte, hex and spaced binary renderings
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use packed_bitset::Bitset;
//!
//! let mut bs = Bitset::<4>::from_bit_str("1011_0011")?;
//! assert_eq!(bs.get(0, 4)?, 0b1011);
//! assert_eq!(bs.count_ones(), 5);
//!
//! // overwrite a field in place
//! bs.assign(3, 4, "0000")?;
//! assert_eq!(bs.get(0, 8)?, 0b1110_0001);
//!
//! // insert eight zero bits at the front
//! bs.slide(0, 8)?;
//! assert_eq!(bs.hexdigest(), "00e1");
//!
//! let other = Bitset::<4>::from_bit_str("1100")?;
//! bs.msb_or(&other)?;
//! assert_eq!(bs.get(0, 4)?, 0b1100);
//! # Ok::<(), packed_bitset::BitsetError>(())
//! ```
//!
//! # Storage Strategy
//!
//! - **Embedded storage**: up to [`EMBED_BITS`] bits (three words) live inside
//!   the struct, with no allocation
//! - **Heap storage**: larger bitsets move to the heap, growing in batches of
//!   `EXPAND` words (the const generic parameter, [`DEFAULT_EXPAND_UNIT`] by
//!   default)
//!
//! Storage never shrinks on its own; [`Bitset::shrink`] releases slack and
//! moves small bitsets back inline.
//!
//! # Logging
//!
//! Storage transitions are reported at `trace` level and rejected mutations
//! of frozen bitsets at `debug` level through the [`log`] facade.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod aggregate;
mod bitset;
mod combine;
mod digest;
mod error;
mod iter;
mod load;
mod slide;
mod slot;
mod storage;
mod traits;
mod transform;
mod word;

pub use bitset::{Bitset, WIDTH_MAX};
pub use combine::Op;
pub use error::{BitsetError, Result};
pub use iter::{Bytes, Fields, Iter};
pub use load::Value;
pub use slot::BitsetSlot;
pub use storage::{DEFAULT_EXPAND_UNIT, EMBED_BITS};
pub use word::{WORD_BITS, Word};
