//! Block storage layout for the bitset.
//!
//! Bit `i` lives in block `i / B::BITS` at position `i % B::BITS`, blocks
//! being stored least-significant first. The functions here translate
//! between the three views (bit position, block index, bit within block)
//! and build the masks the rest of the crate works with.

use alloc::vec::Vec;

use crate::{Block, DynamicBitset};

/// Index of the block holding bit `pos`.
#[inline(always)]
pub(crate) const fn block_index<B: Block>(pos: usize) -> usize {
    pos / B::BITS
}

/// Position of bit `pos` within its block.
#[inline(always)]
pub(crate) const fn bit_index<B: Block>(pos: usize) -> usize {
    pos % B::BITS
}

/// Number of blocks needed to hold `bits` bits.
#[inline(always)]
pub(crate) const fn blocks_required<B: Block>(bits: usize) -> usize {
    bits.div_ceil(B::BITS)
}

/// Single-bit mask selecting bit `pos` inside its block.
#[inline(always)]
pub(crate) fn bit_mask<B: Block>(pos: usize) -> B {
    B::ONE << bit_index::<B>(pos)
}

/// Mask with bits `[bit_index(first), bit_index(last)]` set.
///
/// Both positions must fall in the same block. A range reaching the top bit
/// of the block is built from [`Block::ALL`] alone since shifting by the
/// full block width is not allowed.
#[inline]
pub(crate) fn range_mask<B: Block>(first: usize, last: usize) -> B {
    let first = bit_index::<B>(first);
    let last = bit_index::<B>(last);
    debug_assert!(first <= last, "inverted block range {first}..={last}");
    if last == B::BITS - 1 {
        B::ALL << first
    } else {
        (B::ALL << first) & !(B::ALL << (last + 1))
    }
}

/// Mask of the bits of the last block that are in use for a bitset of
/// `bits` bits. All ones when the size is block-aligned.
#[inline]
pub(crate) fn used_mask<B: Block>(bits: usize) -> B {
    match bit_index::<B>(bits) {
        0 => B::ALL,
        extra => B::ALL >> (B::BITS - extra),
    }
}

/// A builder for assembling a bitset from raw blocks.
///
/// Blocks are appended least-significant first. [`finalize`](Self::finalize)
/// produces a bitset whose size is the number of pushed blocks times the
/// block width; [`finalize_with_len`](Self::finalize_with_len) truncates to a
/// smaller size.
///
/// # Examples
///
/// ```
/// use dyn_bitset::DynamicBitsetBuilder;
///
/// let mut builder = DynamicBitsetBuilder::<u8>::with_capacity(2);
/// builder.push(0b1010_1010);
/// builder.push(0b0000_1111);
/// let bitset = builder.finalize();
///
/// assert_eq!(bitset.len(), 16);
/// assert!(bitset.test(1));
/// assert!(!bitset.test(0));
/// assert!(bitset.test(8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DynamicBitsetBuilder<B: Block> {
    blocks: Vec<B>,
}

impl<B: Block> DynamicBitsetBuilder<B> {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Creates a builder with room for `blocks` blocks.
    #[must_use]
    pub fn with_capacity(blocks: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(blocks),
        }
    }

    /// Number of blocks pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no block has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns a mutable slice of the blocks pushed so far.
    ///
    /// ```
    /// use dyn_bitset::DynamicBitsetBuilder;
    ///
    /// let mut builder = DynamicBitsetBuilder::<u16>::new();
    /// builder.push(0x00FF);
    /// builder.as_mut_slice()[0] |= 0xFF00;
    /// assert!(builder.finalize().all());
    /// ```
    pub fn as_mut_slice(&mut self) -> &mut [B] {
        &mut self.blocks
    }

    /// Appends one block.
    pub fn push(&mut self, block: B) {
        self.blocks.push(block);
    }

    /// Appends a slice of blocks.
    pub fn extend_from_slice(&mut self, blocks: &[B]) {
        self.blocks.extend_from_slice(blocks);
    }

    /// Consumes the builder, producing a bitset of `len() * B::BITS` bits.
    #[must_use]
    pub fn finalize(self) -> DynamicBitset<B> {
        let bits = self.blocks.len() * B::BITS;
        DynamicBitset::from_parts_unchecked(self.blocks, bits)
    }

    /// Consumes the builder, producing a bitset of exactly `bits` bits.
    ///
    /// Missing blocks are zero-filled, surplus blocks are dropped and unused
    /// tail bits are cleared.
    ///
    /// ```
    /// use dyn_bitset::DynamicBitsetBuilder;
    ///
    /// let mut builder = DynamicBitsetBuilder::<u8>::new();
    /// builder.push(0xFF);
    /// let bitset = builder.finalize_with_len(5);
    /// assert_eq!(bitset.to_string(), "11111");
    /// ```
    #[must_use]
    pub fn finalize_with_len(mut self, bits: usize) -> DynamicBitset<B> {
        self.blocks.resize(blocks_required::<B>(bits), B::ZERO);
        let mut bitset = DynamicBitset::from_parts_unchecked(self.blocks, bits);
        bitset.sanitize();
        bitset
    }
}

impl<B: Block> Extend<B> for DynamicBitsetBuilder<B> {
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) {
        self.blocks.extend(iter);
    }
}

impl<B: Block> From<DynamicBitsetBuilder<B>> for DynamicBitset<B> {
    fn from(builder: DynamicBitsetBuilder<B>) -> Self {
        builder.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_translation() {
        assert_eq!(block_index::<u8>(0), 0);
        assert_eq!(block_index::<u8>(7), 0);
        assert_eq!(block_index::<u8>(8), 1);
        assert_eq!(bit_index::<u8>(13), 5);
        assert_eq!(block_index::<u64>(130), 2);
        assert_eq!(bit_index::<u64>(130), 2);
    }

    #[test]
    fn test_blocks_required() {
        assert_eq!(blocks_required::<u64>(0), 0);
        assert_eq!(blocks_required::<u64>(1), 1);
        assert_eq!(blocks_required::<u64>(64), 1);
        assert_eq!(blocks_required::<u64>(65), 2);
        assert_eq!(blocks_required::<u8>(17), 3);
    }

    #[test]
    fn test_bit_mask() {
        assert_eq!(bit_mask::<u8>(3), 0b1000);
        assert_eq!(bit_mask::<u8>(11), 0b1000);
        assert_eq!(bit_mask::<u64>(63), 1 << 63);
    }

    #[test]
    fn test_range_mask() {
        assert_eq!(range_mask::<u8>(2, 4), 0b0001_1100);
        assert_eq!(range_mask::<u8>(0, 7), 0xFF);
        assert_eq!(range_mask::<u8>(5, 7), 0b1110_0000);
        assert_eq!(range_mask::<u8>(3, 3), 0b0000_1000);
        // Positions are reduced to their in-block index.
        assert_eq!(range_mask::<u8>(9, 10), 0b0000_0110);
        assert_eq!(range_mask::<u64>(0, 63), u64::MAX);
        assert_eq!(range_mask::<u64>(63, 63), 1 << 63);
    }

    #[test]
    fn test_used_mask() {
        assert_eq!(used_mask::<u8>(0), 0xFF);
        assert_eq!(used_mask::<u8>(8), 0xFF);
        assert_eq!(used_mask::<u8>(3), 0b0000_0111);
        assert_eq!(used_mask::<u8>(11), 0b0000_0111);
        assert_eq!(used_mask::<u64>(127), u64::MAX >> 1);
    }

    #[test]
    fn test_builder_finalize() {
        let mut builder = DynamicBitsetBuilder::<u16>::with_capacity(3);
        builder.push(0x00FF);
        builder.extend_from_slice(&[0xFF00, 0x0001]);
        assert_eq!(builder.len(), 3);

        let bitset = builder.finalize();
        assert_eq!(bitset.len(), 48);
        assert_eq!(bitset.as_blocks(), &[0x00FF, 0xFF00, 0x0001]);
        assert_eq!(bitset.count(), 17);
    }

    #[test]
    fn test_builder_finalize_with_len() {
        let mut builder = DynamicBitsetBuilder::<u8>::new();
        builder.extend([0xFF, 0xFF]);
        let bitset = builder.clone().finalize_with_len(12);
        assert_eq!(bitset.num_blocks(), 2);
        assert_eq!(bitset.as_blocks(), &[0xFF, 0x0F]);

        let grown = builder.finalize_with_len(30);
        assert_eq!(grown.num_blocks(), 4);
        assert_eq!(grown.count(), 16);
        assert!(grown.check_consistency());
    }
}
