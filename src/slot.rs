//! A cell that holds a [`Bitset`] once it has been explicitly initialised.
//!
//! Embedders that allocate a handle first and fill it later use this to get
//! [`BitsetError::Uninitialized`] and [`BitsetError::AlreadyInitialized`]
//! instead of silently operating on an empty bitset.

use crate::{
    Bitset,
    error::{BitsetError, Result},
    storage::DEFAULT_EXPAND_UNIT,
};

/// An explicitly initialised [`Bitset`] handle.
///
/// # Examples
///
/// ```
/// use packed_bitset::{Bitset, BitsetError, BitsetSlot};
///
/// let mut slot = BitsetSlot::<4>::new();
/// assert_eq!(slot.get().err(), Some(BitsetError::Uninitialized));
///
/// slot.init(Bitset::from_bit_str("101")?)?;
/// assert_eq!(slot.get()?.len(), 3);
/// assert_eq!(slot.init(Bitset::new()).err(), Some(BitsetError::AlreadyInitialized));
/// # Ok::<(), BitsetError>(())
/// ```
#[derive(Debug, Default)]
pub struct BitsetSlot<const EXPAND: usize = DEFAULT_EXPAND_UNIT>(Option<Bitset<EXPAND>>);

impl<const EXPAND: usize> BitsetSlot<EXPAND> {
    /// Creates an uninitialised slot.
    #[must_use]
    pub const fn new() -> Self {
        Self(None)
    }

    /// Returns `true` once [`init`](Self::init) has succeeded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.0.is_some()
    }

    /// Stores `bitset` in an uninitialised slot.
    ///
    /// # Errors
    ///
    /// [`BitsetError::AlreadyInitialized`] if the slot already holds one.
    pub fn init(&mut self, bitset: Bitset<EXPAND>) -> Result<&mut Bitset<EXPAND>> {
        if self.0.is_some() {
            log::debug!("bitset: rejected re-initialization of slot");
            return Err(BitsetError::AlreadyInitialized);
        }
        Ok(self.0.insert(bitset))
    }

    /// Stores a deep copy of `other`.
    ///
    /// # Errors
    ///
    /// [`BitsetError::AlreadyInitialized`] if the slot already holds one.
    pub fn init_copy<const F: usize>(&mut self, other: &Bitset<F>) -> Result<&mut Bitset<EXPAND>> {
        self.init(Bitset::from_source(other, None)?)
    }

    /// Borrows the bitset.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Uninitialized`] before [`init`](Self::init).
    pub fn get(&self) -> Result<&Bitset<EXPAND>> {
        self.0.as_ref().ok_or(BitsetError::Uninitialized)
    }

    /// Mutably borrows the bitset.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Uninitialized`] before [`init`](Self::init).
    pub fn get_mut(&mut self) -> Result<&mut Bitset<EXPAND>> {
        self.0.as_mut().ok_or(BitsetError::Uninitialized)
    }

    /// Takes the bitset out, leaving the slot uninitialised.
    ///
    /// # Errors
    ///
    /// [`BitsetError::Uninitialized`] before [`init`](Self::init).
    pub fn take(&mut self) -> Result<Bitset<EXPAND>> {
        self.0.take().ok_or(BitsetError::Uninitialized)
    }
}
