//! The [`Block`] capability: fixed-width unsigned words that bits are packed
//! into.
//!
//! Every bitset operation is expressed in terms of a handful of word
//! primitives. Population count and bit scanning use the core integer
//! intrinsics by default; enabling the `portable` feature swaps in the
//! bit-by-bit fallbacks from [`portable`] without touching any caller.

use core::{
    fmt,
    hash::Hash,
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
        ShrAssign,
    },
};

mod sealed {
    pub trait Sealed {}
}

/// An unsigned integer type usable as the storage unit of a
/// [`DynamicBitset`](crate::DynamicBitset).
///
/// Implemented for `u8`, `u16`, `u32`, `u64`, `u128` and `usize`. The trait
/// is sealed.
///
/// Shift amounts passed to the shift operators must be strictly less than
/// [`BITS`](Self::BITS); the bitset never shifts a block by its full width.
pub trait Block:
    sealed::Sealed
    + Copy
    + Default
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Binary
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
    + Shl<usize, Output = Self>
    + Shr<usize, Output = Self>
    + ShlAssign<usize>
    + ShrAssign<usize>
    + Send
    + Sync
    + 'static
{
    /// Number of bits held by one block.
    const BITS: usize;
    /// The block with no bit set.
    const ZERO: Self;
    /// The block with only bit 0 set.
    const ONE: Self;
    /// The block with every bit set.
    const ALL: Self;

    /// Number of set bits in the block.
    fn popcount(self) -> usize;

    /// Index of the lowest set bit.
    ///
    /// The block must be nonzero.
    fn lowest_set_bit(self) -> usize;

    /// Index of the highest set bit.
    ///
    /// The block must be nonzero.
    fn highest_set_bit(self) -> usize;

    /// Truncating conversion from a `u64`.
    fn from_u64(value: u64) -> Self;

    /// Widening conversion to a `u128`. Blocks are at most 128 bits wide.
    fn to_u128(self) -> u128;

    /// [`ONE`](Self::ONE) for `true`, [`ZERO`](Self::ZERO) for `false`.
    #[inline(always)]
    fn from_bool(bit: bool) -> Self {
        if bit { Self::ONE } else { Self::ZERO }
    }

    /// [`ALL`](Self::ALL) for `true`, [`ZERO`](Self::ZERO) for `false`.
    #[inline(always)]
    fn splat(bit: bool) -> Self {
        if bit { Self::ALL } else { Self::ZERO }
    }
}

/// Software fallbacks for the scanning and counting primitives.
///
/// These walk the block one bit at a time and work for any [`Block`]. They
/// back the [`Block`] implementations when the `portable` feature is enabled
/// and are always available for callers that want a reference result.
pub mod portable {
    use super::Block;

    /// Counts set bits one position at a time.
    pub fn popcount<B: Block>(block: B) -> usize {
        let mut count = 0;
        let mut mask = B::ONE;
        for _ in 0..B::BITS {
            if block & mask != B::ZERO {
                count += 1;
            }
            mask <<= 1;
        }
        count
    }

    /// Finds the lowest set bit, returning [`Block::BITS`] for a zero block.
    pub fn lowest_set_bit<B: Block>(block: B) -> usize {
        debug_assert!(block != B::ZERO, "scanning an all-zero block");
        let mut mask = B::ONE;
        for i in 0..B::BITS {
            if block & mask != B::ZERO {
                return i;
            }
            mask <<= 1;
        }
        B::BITS
    }

    /// Finds the highest set bit, returning [`Block::BITS`] for a zero block.
    pub fn highest_set_bit<B: Block>(block: B) -> usize {
        debug_assert!(block != B::ZERO, "scanning an all-zero block");
        let mut mask = B::ONE << (B::BITS - 1);
        for i in (0..B::BITS).rev() {
            if block & mask != B::ZERO {
                return i;
            }
            mask >>= 1;
        }
        B::BITS
    }
}

macro_rules! impl_block {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Block for $t {
            const BITS: usize = <$t>::BITS as usize;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const ALL: Self = <$t>::MAX;

            #[cfg(not(feature = "portable"))]
            #[inline(always)]
            fn popcount(self) -> usize {
                <$t>::count_ones(self) as usize
            }

            #[cfg(feature = "portable")]
            #[inline]
            fn popcount(self) -> usize {
                portable::popcount(self)
            }

            #[cfg(not(feature = "portable"))]
            #[inline(always)]
            fn lowest_set_bit(self) -> usize {
                debug_assert!(self != 0, "scanning an all-zero block");
                <$t>::trailing_zeros(self) as usize
            }

            #[cfg(feature = "portable")]
            #[inline]
            fn lowest_set_bit(self) -> usize {
                portable::lowest_set_bit(self)
            }

            #[cfg(not(feature = "portable"))]
            #[inline(always)]
            fn highest_set_bit(self) -> usize {
                debug_assert!(self != 0, "scanning an all-zero block");
                (<$t>::BITS - 1 - <$t>::leading_zeros(self)) as usize
            }

            #[cfg(feature = "portable")]
            #[inline]
            fn highest_set_bit(self) -> usize {
                portable::highest_set_bit(self)
            }

            #[inline(always)]
            fn from_u64(value: u64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn to_u128(self) -> u128 {
                self as u128
            }
        }
    )*};
}

impl_block!(u8, u16, u32, u64, u128, usize);
