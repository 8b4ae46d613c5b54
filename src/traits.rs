//! Trait implementations for `Bitset`.

use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{BitAnd, BitOr, BitXor, Neg, Not},
    str::FromStr,
};

use crate::{
    Bitset,
    combine::Op,
    error::BitsetError,
    word::{Word, write_field},
};

impl<const EXPAND: usize> Clone for Bitset<EXPAND> {
    /// Deep copy sized to the live bits. The copy is never frozen.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.duplicate(self.len, EXPAND),
            len: self.len,
            frozen: false,
        }
    }
}

impl<const E: usize, const F: usize> PartialEq<Bitset<F>> for Bitset<E> {
    fn eq(&self, other: &Bitset<F>) -> bool {
        self.bits_eq(other)
    }
}

impl<const EXPAND: usize> Eq for Bitset<EXPAND> {}

impl<const EXPAND: usize> Hash for Bitset<EXPAND> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        state.write_usize(self.crc());
    }
}

impl<const EXPAND: usize> AsRef<[Word]> for Bitset<EXPAND> {
    fn as_ref(&self) -> &[Word] {
        self.as_words()
    }
}

impl<const EXPAND: usize> fmt::Display for Bitset<EXPAND> {
    /// Formats the bits as [`bindigest`](Bitset::bindigest) does.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1111 0000 1")?;
    /// assert_eq!(bs.to_string(), "11110000 1");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bindigest())
    }
}

impl<const EXPAND: usize> fmt::Binary for Bitset<EXPAND> {
    /// Formats the bits without separators, bit `0` first.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1111 0000 1")?;
    /// assert_eq!(format!("{bs:b}"), "111100001");
    /// assert_eq!(format!("{bs:#b}"), "0b111100001");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0b")?;
        }
        for bit in self {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl<const EXPAND: usize> fmt::LowerHex for Bitset<EXPAND> {
    /// Formats the bits as [`hexdigest`](Bitset::hexdigest) does.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.hexdigest())
    }
}

impl<const EXPAND: usize> fmt::Debug for Bitset<EXPAND> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitset [{}] {}", self.len, self.bindigest())
    }
}

impl<const EXPAND: usize> FromStr for Bitset<EXPAND> {
    type Err = BitsetError;

    /// Parses a bit string; see [`Bitset::from_bit_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bit_str(s)
    }
}

impl<const EXPAND: usize> From<&[bool]> for Bitset<EXPAND> {
    fn from(bits: &[bool]) -> Self {
        Self::from_bools(bits)
    }
}

impl<const EXPAND: usize> FromIterator<bool> for Bitset<EXPAND> {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bs = Self::new();
        for bit in iter {
            let at = bs.len;
            bs.zero_extend(at + 1);
            if bit {
                write_field(&mut bs.storage, at, 1, 1);
            }
        }
        bs
    }
}

// ============================================================================
// Bitwise Operator Implementations
// ============================================================================

macro_rules! binary_ops {
    ($($trait:ident $method:ident => $op:ident;)*) => {
        $(
            impl<const E: usize, const F: usize> $trait<&Bitset<F>> for &Bitset<E> {
                type Output = Bitset<E>;

                /// Combines copies of both operands aligned at bit `0`; the
                /// result has the longer length.
                #[inline]
                fn $method(self, rhs: &Bitset<F>) -> Self::Output {
                    let mut out = self.clone();
                    out.msb_combine(rhs.as_words(), rhs.len, Op::$op);
                    out
                }
            }
        )*
    };
}

binary_ops! {
    BitOr bitor => Or;
    BitAnd bitand => And;
    BitXor bitxor => Xor;
}

impl<const EXPAND: usize> Not for &Bitset<EXPAND> {
    type Output = Bitset<EXPAND>;

    /// Returns an inverted copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bitset::Bitset;
    /// let bs = Bitset::<4>::from_bit_str("1100")?;
    /// assert_eq!((!&bs).to_string(), "0011");
    /// # Ok::<(), packed_bitset::BitsetError>(())
    /// ```
    #[inline]
    fn not(self) -> Self::Output {
        self.flipped()
    }
}

impl<const EXPAND: usize> Neg for &Bitset<EXPAND> {
    type Output = Bitset<EXPAND>;

    /// Returns the two's complement as a copy.
    #[inline]
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    type Bs = Bitset<4>;

    #[test]
    fn test_clone_is_unfrozen_and_compact() {
        let mut bs = Bs::with_capacity(2000);
        bs.push(0b101, 3).unwrap();
        bs.freeze();
        let copy = bs.clone();
        assert!(!copy.is_frozen());
        assert!(!copy.is_heap());
        assert_eq!(copy, bs);
    }

    #[test]
    fn test_equal_bitsets_hash_equally() {
        let a = Bs::from_bit_str("1011").unwrap();
        let mut b = Bs::with_capacity(500);
        b.push(0b1011, 4).unwrap();

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&Bs::from_bit_str("10110").unwrap()));
    }

    #[test]
    fn test_equality_needs_equal_length() {
        assert_ne!(Bs::from_bit_str("10").unwrap(), Bs::from_bit_str("100").unwrap());
        assert_eq!(Bs::new(), Bitset::<1>::new());
    }

    #[test]
    fn test_operators() {
        let a = Bs::from_bit_str("1100").unwrap();
        let b = Bs::from_bit_str("101010").unwrap();
        assert_eq!((&a | &b).to_string(), "111010");
        assert_eq!((&a & &b).to_string(), "100000");
        assert_eq!((&a ^ &b).to_string(), "011010");
        assert_eq!((-&a).to_string(), "0100");
        assert_eq!(a.to_string(), "1100");
    }

    #[test]
    fn test_debug_and_hex() {
        let bs = Bs::from_bit_str("1111 0000 1").unwrap();
        assert_eq!(format!("{bs:?}"), "Bitset [9] 11110000 1");
        assert_eq!(format!("{bs:x}"), "f08");
        assert_eq!(format!("{bs:#x}"), "0xf08");
    }

    #[test]
    fn test_collect_and_parse() {
        let bs: Bs = [true, false, true].into_iter().collect();
        assert_eq!(bs, "101".parse::<Bs>().unwrap());
        assert_eq!(Bs::from(&[true, false, true][..]), bs);
        assert!("12".parse::<Bs>().is_err());
    }
}
