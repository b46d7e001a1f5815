//! Borrowing proxies for mutating a bitset in place.
//!
//! [`BitRef`] stands for one bit, [`BlocksMut`] for the whole block slice.
//! Both hold a mutable borrow of the bitset, so nothing that reallocates or
//! resizes can run while they are alive.

use core::{
    fmt,
    ops::{BitAndAssign, BitOrAssign, BitXorAssign, Deref, DerefMut, Not, SubAssign},
};

use crate::{Block, DynamicBitset};

/// A mutable reference to a single bit of a [`DynamicBitset`].
///
/// Created by [`DynamicBitset::bit_mut`]. Compound assignment with a `bool`
/// combines the referenced bit with the operand.
///
/// # Examples
///
/// ```
/// use dyn_bitset::DynamicBitset;
///
/// let mut bitset = DynamicBitset::<u8>::with_value(4, 0b0011);
///
/// let mut bit = bitset.bit_mut(0);
/// bit &= false;
/// assert!(!bit.get());
///
/// let mut top = bitset.bit_mut(3);
/// top ^= true;
/// bitset.bit_mut(1).flip();
/// assert_eq!(bitset.to_string(), "1000");
/// ```
pub struct BitRef<'a, B: Block> {
    block: &'a mut B,
    mask: B,
}

impl<'a, B: Block> BitRef<'a, B> {
    #[inline]
    pub(crate) fn new(block: &'a mut B, mask: B) -> Self {
        Self { block, mask }
    }

    /// Current value of the bit.
    #[must_use]
    #[inline]
    pub fn get(&self) -> bool {
        *self.block & self.mask != B::ZERO
    }

    /// Sets the bit.
    #[inline]
    pub fn set(&mut self) -> &mut Self {
        *self.block |= self.mask;
        self
    }

    /// Clears the bit.
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        *self.block &= !self.mask;
        self
    }

    /// Complements the bit.
    #[inline]
    pub fn flip(&mut self) -> &mut Self {
        *self.block ^= self.mask;
        self
    }

    /// Sets the bit to `value`.
    #[inline]
    pub fn assign(&mut self, value: bool) -> &mut Self {
        if value { self.set() } else { self.reset() }
    }
}

impl<B: Block> BitAndAssign<bool> for BitRef<'_, B> {
    fn bitand_assign(&mut self, rhs: bool) {
        if !rhs {
            self.reset();
        }
    }
}

impl<B: Block> BitOrAssign<bool> for BitRef<'_, B> {
    fn bitor_assign(&mut self, rhs: bool) {
        if rhs {
            self.set();
        }
    }
}

impl<B: Block> BitXorAssign<bool> for BitRef<'_, B> {
    fn bitxor_assign(&mut self, rhs: bool) {
        if rhs {
            self.flip();
        }
    }
}

/// `bit -= rhs` clears the bit when `rhs` is set.
impl<B: Block> SubAssign<bool> for BitRef<'_, B> {
    fn sub_assign(&mut self, rhs: bool) {
        if rhs {
            self.reset();
        }
    }
}

/// `!bit` reads the complemented value without writing it back.
impl<B: Block> Not for &BitRef<'_, B> {
    type Output = bool;

    fn not(self) -> bool {
        !self.get()
    }
}

impl<B: Block> From<BitRef<'_, B>> for bool {
    fn from(bit: BitRef<'_, B>) -> Self {
        bit.get()
    }
}

impl<B: Block> PartialEq<bool> for BitRef<'_, B> {
    fn eq(&self, other: &bool) -> bool {
        self.get() == *other
    }
}

impl<B: Block> fmt::Debug for BitRef<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

/// A mutable view of the blocks of a [`DynamicBitset`].
///
/// Created by [`DynamicBitset::blocks_mut`]. Dereferences to `[B]`; the
/// number of blocks cannot change through it. Bits written past the size of
/// the bitset are cleared when the view is dropped.
pub struct BlocksMut<'a, B: Block> {
    bitset: &'a mut DynamicBitset<B>,
}

impl<'a, B: Block> BlocksMut<'a, B> {
    pub(crate) fn new(bitset: &'a mut DynamicBitset<B>) -> Self {
        Self { bitset }
    }
}

impl<B: Block> Deref for BlocksMut<'_, B> {
    type Target = [B];

    fn deref(&self) -> &[B] {
        &self.bitset.blocks
    }
}

impl<B: Block> DerefMut for BlocksMut<'_, B> {
    fn deref_mut(&mut self) -> &mut [B] {
        &mut self.bitset.blocks
    }
}

impl<B: Block> Drop for BlocksMut<'_, B> {
    fn drop(&mut self) {
        self.bitset.sanitize();
    }
}
