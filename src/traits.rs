//! Trait implementations for `DynamicBitset`.

use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
    hint,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Index, Not, Sub, SubAssign},
    str::FromStr,
};

use crate::{Block, DynamicBitset};

/// Errors that can occur when parsing text into a [`DynamicBitset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBitsetError {
    /// A character other than the two digit symbols was found.
    InvalidChar {
        /// The offending character
        ch: char,
        /// Character offset of the offending character in the input
        pos: usize,
    },

    /// The starting offset lies past the end of the input.
    OutOfRange {
        /// The requested starting offset
        pos: usize,
        /// Number of characters in the input
        len: usize,
    },
}

impl fmt::Display for ParseBitsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { ch, pos } => {
                write!(f, "invalid character '{ch}' at position {pos} in bitset string")
            }
            Self::OutOfRange { pos, len } => {
                write!(f, "offset {pos} is past the end of a {len}-character string")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseBitsetError {}

/// Error type for converting a `DynamicBitset` to a primitive integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryFromBitsetError {
    /// A bit above the width of the target type is set.
    TooManyBits {
        /// Maximum number of bits the target type can hold
        max_bits: usize,
        /// Number of bits needed, one past the highest set bit
        actual_bits: usize,
    },
}

impl fmt::Display for TryFromBitsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyBits {
                max_bits,
                actual_bits,
            } => write!(
                f,
                "bitset needs {actual_bits} bits but target type can only hold {max_bits} bits"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TryFromBitsetError {}

impl<B: Block> Default for DynamicBitset<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Block> From<DynamicBitset<B>> for Vec<B> {
    fn from(bitset: DynamicBitset<B>) -> Self {
        bitset.into_blocks()
    }
}

impl<B: Block> From<Vec<B>> for DynamicBitset<B> {
    /// Takes ownership of whole blocks; the size is `blocks.len() * B::BITS`.
    fn from(blocks: Vec<B>) -> Self {
        let bits = blocks.len() * B::BITS;
        Self::from_parts_unchecked(blocks, bits)
    }
}

impl<B: Block> From<&[B]> for DynamicBitset<B> {
    fn from(blocks: &[B]) -> Self {
        Self::from(blocks.to_vec())
    }
}

impl<B: Block, const N: usize> From<[B; N]> for DynamicBitset<B> {
    fn from(blocks: [B; N]) -> Self {
        Self::from(Vec::from(blocks))
    }
}

impl<B: Block> AsRef<[B]> for DynamicBitset<B> {
    fn as_ref(&self) -> &[B] {
        self.as_blocks()
    }
}

// ============================================================================
// Text
// ============================================================================

impl<B: Block> fmt::Display for DynamicBitset<B> {
    /// Writes `len()` characters, the highest-indexed bit first.
    ///
    /// ```
    /// use dyn_bitset::DynamicBitset;
    ///
    /// let bitset = DynamicBitset::<u8>::with_value(10, 0b11_0000_0101);
    /// assert_eq!(bitset.to_string(), "1100000101");
    /// assert_eq!(DynamicBitset::<u8>::new().to_string(), "");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with('0', '1'))
    }
}

impl<B: Block> fmt::Binary for DynamicBitset<B> {
    /// Same as [`Display`](fmt::Display); the alternate flag adds a `0b`
    /// prefix.
    ///
    /// ```
    /// use dyn_bitset::DynamicBitset;
    ///
    /// let bitset = DynamicBitset::<u16>::with_value(6, 0b101);
    /// assert_eq!(format!("{bitset:b}"), "000101");
    /// assert_eq!(format!("{bitset:#b}"), "0b000101");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0b")?;
        }
        fmt::Display::fmt(self, f)
    }
}

impl<B: Block> FromStr for DynamicBitset<B> {
    type Err = ParseBitsetError;

    /// Parses a string of `0` and `1` characters, the last character
    /// becoming bit 0. The size is the number of digits, so leading zeros are
    /// kept. An optional `0b` prefix is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBitsetError::InvalidChar`] for any other character.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_bitset::DynamicBitset;
    ///
    /// let bitset: DynamicBitset<u8> = "0010110".parse()?;
    /// assert_eq!(bitset.len(), 7);
    /// assert_eq!(bitset.as_blocks(), &[0b0010110]);
    ///
    /// let prefixed: DynamicBitset<u8> = "0b0010110".parse()?;
    /// assert_eq!(prefixed, bitset);
    ///
    /// assert!("012".parse::<DynamicBitset<u8>>().is_err());
    /// # Ok::<(), dyn_bitset::ParseBitsetError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0b").unwrap_or(s);
        Self::from_str_with(s, 0, usize::MAX, '0', '1')
    }
}

impl<B: Block> fmt::Debug for DynamicBitset<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicBitset")
            .field("len", &self.len())
            .field("bits", &self.to_string_with('0', '1'))
            .finish()
    }
}

// ============================================================================
// Equality, Ordering, Hashing
// ============================================================================

impl<B: Block> PartialEq for DynamicBitset<B> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits && self.blocks == other.blocks
    }
}

impl<B: Block> Eq for DynamicBitset<B> {}

impl<B: Block> PartialOrd for DynamicBitset<B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<B: Block> Ord for DynamicBitset<B> {
    /// Orders by numeric value, then by size.
    ///
    /// Bitsets are compared as unsigned integers, the highest-indexed bit
    /// being most significant. Equal values of different sizes order the
    /// shorter one first, which makes the empty bitset the minimum.
    ///
    /// ```
    /// use dyn_bitset::DynamicBitset;
    ///
    /// let a = DynamicBitset::<u8>::with_value(4, 0b0110);
    /// let b = DynamicBitset::<u8>::with_value(20, 0b0110);
    /// let c = DynamicBitset::<u8>::with_value(3, 0b111);
    ///
    /// assert!(a < b);
    /// assert!(b < c);
    /// assert!(DynamicBitset::<u8>::new() < a);
    /// ```
    fn cmp(&self, other: &Self) -> Ordering {
        let swap = self.blocks.len() < other.blocks.len();
        let (a, b) = if swap { (other, self) } else { (self, other) };
        let (low, high) = a.blocks.split_at(b.blocks.len());

        let result = if high.iter().any(|&block| block != B::ZERO) {
            Ordering::Greater
        } else {
            low.iter()
                .rev()
                .cmp(b.blocks.iter().rev())
                .then_with(|| a.bits.cmp(&b.bits))
        };
        hint::select_unpredictable(swap, result.reverse(), result)
    }
}

impl<B: Block> Hash for DynamicBitset<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
        self.blocks.hash(state);
    }
}

impl<B: Block> Index<usize> for DynamicBitset<B> {
    type Output = bool;

    /// Returns `&true` or `&false`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range.
    fn index(&self, pos: usize) -> &bool {
        assert!(pos < self.len(), "bit {pos} out of range for {} bits", self.len());
        if self.test(pos) { &true } else { &false }
    }
}

// ============================================================================
// Bitwise Operator Implementations
// ============================================================================

macro_rules! impl_bitwise_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $with:ident) => {
        impl<B: Block> $assign<&Self> for DynamicBitset<B> {
            fn $assign_method(&mut self, rhs: &Self) {
                self.$with(rhs);
            }
        }

        impl<B: Block> $assign for DynamicBitset<B> {
            fn $assign_method(&mut self, rhs: Self) {
                self.$with(&rhs);
            }
        }

        impl<B: Block> $op for DynamicBitset<B> {
            type Output = Self;

            fn $method(mut self, rhs: Self) -> Self {
                self.$with(&rhs);
                self
            }
        }

        impl<B: Block> $op<&DynamicBitset<B>> for DynamicBitset<B> {
            type Output = Self;

            fn $method(mut self, rhs: &Self) -> Self {
                self.$with(rhs);
                self
            }
        }

        impl<B: Block> $op for &DynamicBitset<B> {
            type Output = DynamicBitset<B>;

            fn $method(self, rhs: Self) -> DynamicBitset<B> {
                let mut result = self.clone();
                result.$with(rhs);
                result
            }
        }
    };
}

impl_bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, intersect_with);
impl_bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, union_with);
impl_bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, symmetric_difference_with);
impl_bitwise_op!(Sub, sub, SubAssign, sub_assign, difference_with);

impl<B: Block> Not for DynamicBitset<B> {
    type Output = Self;

    /// Complements every bit, keeping the size.
    ///
    /// ```
    /// use dyn_bitset::DynamicBitset;
    ///
    /// let bitset = DynamicBitset::<u8>::with_value(10, 0b00_1111_0000);
    /// assert_eq!((!bitset).to_string(), "1100001111");
    /// ```
    fn not(mut self) -> Self {
        self.flip_all();
        self
    }
}

impl<B: Block> Not for &DynamicBitset<B> {
    type Output = DynamicBitset<B>;

    fn not(self) -> DynamicBitset<B> {
        !self.clone()
    }
}

// ============================================================================
// Integer Conversions
// ============================================================================

impl<B: Block> DynamicBitset<B> {
    /// Gathers the blocks covering the low 128 bits into one integer.
    fn low_u128(&self) -> u128 {
        self.blocks
            .iter()
            .take(128usize.div_ceil(B::BITS))
            .enumerate()
            .fold(0, |acc, (i, block)| acc | (block.to_u128() << (i * B::BITS)))
    }

    fn check_fits(&self, max_bits: usize) -> Result<(), TryFromBitsetError> {
        match self.ones().next_back() {
            Some(last) if last >= max_bits => Err(TryFromBitsetError::TooManyBits {
                max_bits,
                actual_bits: last + 1,
            }),
            _ => Ok(()),
        }
    }
}

impl<B: Block> TryFrom<&DynamicBitset<B>> for u64 {
    type Error = TryFromBitsetError;

    /// Reads the bitset as an unsigned integer, bit 0 least significant.
    ///
    /// # Errors
    ///
    /// Returns an error if a bit at position 64 or above is set. Unset high
    /// bits are fine, whatever the size.
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_bitset::DynamicBitset;
    ///
    /// let bitset = DynamicBitset::<u8>::with_value(200, 0xDEAD_BEEF);
    /// assert_eq!(u64::try_from(&bitset), Ok(0xDEAD_BEEF));
    ///
    /// let mut wide = bitset.clone();
    /// wide.set(64, true);
    /// assert!(u64::try_from(&wide).is_err());
    /// ```
    fn try_from(bitset: &DynamicBitset<B>) -> Result<Self, Self::Error> {
        bitset.check_fits(64)?;
        Ok(bitset.low_u128() as Self)
    }
}

impl<B: Block> TryFrom<&DynamicBitset<B>> for u128 {
    type Error = TryFromBitsetError;

    /// Reads the bitset as an unsigned integer, bit 0 least significant.
    ///
    /// # Errors
    ///
    /// Returns an error if a bit at position 128 or above is set.
    fn try_from(bitset: &DynamicBitset<B>) -> Result<Self, Self::Error> {
        bitset.check_fits(128)?;
        Ok(bitset.low_u128())
    }
}
