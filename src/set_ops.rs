//! Block-wise logical operations and set relations for `DynamicBitset`.
//!
//! The in-place operations combine two bitsets of equal size block by block.
//! The size requirement is checked in debug builds; in release builds the
//! shorter operand determines how many blocks take part.

use crate::{Block, DynamicBitset};

impl<B: Block> DynamicBitset<B> {
    #[inline(always)]
    fn zip_blocks_with(&mut self, other: &Self, op: impl Fn(&mut B, B)) {
        debug_assert_eq!(
            self.bits, other.bits,
            "bitwise operation on bitsets of different sizes"
        );
        for (dst, &src) in self.blocks.iter_mut().zip(&other.blocks) {
            op(dst, src);
        }
    }

    /// Sets each bit to `self[i] & other[i]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut a = DynamicBitset::<u16>::with_value(16, 0x00FF);
    /// let b = DynamicBitset::<u16>::with_value(16, 0xFF00);
    /// a.intersect_with(&b);
    /// assert!(a.none());
    /// ```
    pub fn intersect_with(&mut self, other: &Self) {
        self.zip_blocks_with(other, |dst, src| *dst &= src);
    }

    /// Sets each bit to `self[i] | other[i]`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut a = DynamicBitset::<u16>::with_value(16, 0x00FF);
    /// let b = DynamicBitset::<u16>::with_value(16, 0xFF00);
    /// a.union_with(&b);
    /// assert!(a.all());
    /// ```
    pub fn union_with(&mut self, other: &Self) {
        self.zip_blocks_with(other, |dst, src| *dst |= src);
    }

    /// Sets each bit to `self[i] ^ other[i]`.
    pub fn symmetric_difference_with(&mut self, other: &Self) {
        self.zip_blocks_with(other, |dst, src| *dst ^= src);
    }

    /// Sets each bit to `self[i] & !other[i]`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut a = DynamicBitset::<u8>::with_value(6, 0b11_1100);
    /// let b = DynamicBitset::<u8>::with_value(6, 0b01_0110);
    /// a.difference_with(&b);
    /// assert_eq!(a.to_string(), "101000");
    /// ```
    pub fn difference_with(&mut self, other: &Self) {
        self.zip_blocks_with(other, |dst, src| *dst &= !src);
    }

    /// Returns `self & other` as a new bitset.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Returns `self | other` as a new bitset.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    /// Returns `self ^ other` as a new bitset.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.symmetric_difference_with(other);
        result
    }

    /// Returns `self & !other` as a new bitset.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.difference_with(other);
        result
    }

    /// Returns `true` if every bit set in `self` is also set in `other`.
    ///
    /// Both bitsets must have the same size.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let small = DynamicBitset::<u8>::with_value(10, 0b00_0000_0101);
    /// let large = DynamicBitset::<u8>::with_value(10, 0b10_0000_0111);
    /// assert!(small.is_subset_of(&large));
    /// assert!(!large.is_subset_of(&small));
    /// assert!(small.is_subset_of(&small));
    /// ```
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        debug_assert_eq!(self.bits, other.bits, "subset test on bitsets of different sizes");
        self.blocks
            .iter()
            .zip(&other.blocks)
            .all(|(&a, &b)| a & !b == B::ZERO)
    }

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    ///
    /// Both bitsets must have the same size.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let small = DynamicBitset::<u8>::with_value(10, 0b0101);
    /// let large = DynamicBitset::<u8>::with_value(10, 0b0111);
    /// assert!(small.is_proper_subset_of(&large));
    /// assert!(!small.is_proper_subset_of(&small));
    /// ```
    #[must_use]
    pub fn is_proper_subset_of(&self, other: &Self) -> bool {
        debug_assert_eq!(
            self.bits, other.bits,
            "proper subset test on bitsets of different sizes"
        );
        let mut differs = false;
        for (&a, &b) in self.blocks.iter().zip(&other.blocks) {
            if a & !b != B::ZERO {
                return false;
            }
            differs |= a != b;
        }
        differs
    }

    /// Returns `true` if `self` and `other` have at least one set bit in
    /// common.
    ///
    /// The sizes may differ; only the overlapping low blocks are compared.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let a = DynamicBitset::<u8>::with_value(20, 1 << 12);
    /// let b = DynamicBitset::<u8>::with_value(13, 1 << 12);
    /// let c = DynamicBitset::<u8>::with_value(4, 0b1111);
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.blocks
            .iter()
            .zip(&other.blocks)
            .any(|(&a, &b)| a & b != B::ZERO)
    }
}
