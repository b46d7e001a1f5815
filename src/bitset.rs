//! `DynamicBitset` struct and core implementation.

use alloc::{string::String, vec, vec::Vec};
use core::{mem, ops::ControlFlow};

use crate::{
    Block,
    iter::Ones,
    macros::{bitpos, debug_assert_consistent, debug_event, trace_event},
    reference::{BitRef, BlocksMut},
    storage::{DynamicBitsetBuilder, bit_mask, blocks_required, range_mask, used_mask},
    traits::ParseBitsetError,
};

/// A runtime-resizable bitset packed into blocks of type `B`.
///
/// # Overview
///
/// `DynamicBitset` stores `len()` bits in `ceil(len() / B::BITS)` blocks,
/// least-significant block first. Bit `i` is bit `i % B::BITS` of block
/// `i / B::BITS`. Bits of the last block beyond `len()` are always zero,
/// which lets counting, comparison and the `any`/`all` queries work on
/// whole blocks.
///
/// # Positions
///
/// Operations taking a position require `pos < len()`. The requirement is
/// checked with a debug assertion; in release builds an out-of-range
/// position either panics on slice indexing or touches an unused tail bit
/// that is cleared again by the next sanitizing operation.
///
/// # Examples
///
/// ```
/// use dyn_bitset::DynamicBitset;
///
/// let mut bitset = DynamicBitset::<u8>::with_value(11, 0b101_1010_0101);
/// assert_eq!(bitset.to_string(), "10110100101");
/// assert_eq!(bitset.count(), 6);
///
/// bitset.push(true);
/// assert_eq!(bitset.len(), 12);
/// assert_eq!(bitset.num_blocks(), 2);
///
/// bitset <<= 4;
/// assert_eq!(bitset.to_string(), "101001010000");
/// ```
#[derive(Clone)]
pub struct DynamicBitset<B: Block = u64> {
    pub(crate) blocks: Vec<B>,
    pub(crate) bits: usize,
}

impl<B: Block> DynamicBitset<B> {
    /// Creates an empty bitset without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u32>::new();
    /// assert!(bitset.is_empty());
    /// assert_eq!(bitset.capacity(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            blocks: Vec::new(),
            bits: 0,
        }
    }

    /// Builds a bitset from blocks and a size the caller has already checked.
    pub(crate) const fn from_parts_unchecked(blocks: Vec<B>, bits: usize) -> Self {
        Self { blocks, bits }
    }

    /// Creates an empty bitset with room for at least `bits` bits.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u64>::with_capacity(100);
    /// assert!(bitset.is_empty());
    /// assert!(bitset.capacity() >= 100);
    /// ```
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(blocks_required::<B>(bits)),
            bits: 0,
        }
    }

    /// Creates a bitset of `bits` bits whose lowest bits are taken from
    /// `value`; the remaining bits are zero.
    ///
    /// Bits of `value` at positions `>= bits` are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u8>::with_value(12, 0xABC);
    /// assert_eq!(bitset.as_blocks(), &[0xBC, 0x0A]);
    ///
    /// let truncated = DynamicBitset::<u8>::with_value(4, 0xFF);
    /// assert_eq!(truncated.to_string(), "1111");
    /// ```
    #[must_use]
    pub fn with_value(bits: usize, value: u64) -> Self {
        let mut blocks = vec![B::ZERO; blocks_required::<B>(bits)];
        if value != 0 {
            let value_blocks = (u64::BITS as usize).div_ceil(B::BITS);
            for (i, block) in blocks.iter_mut().take(value_blocks).enumerate() {
                *block = B::from_u64(value >> (i * B::BITS));
            }
        }
        let mut bitset = Self { blocks, bits };
        bitset.sanitize();
        debug_assert_consistent!(bitset);
        bitset
    }

    /// Creates a bitset of `bits` bits, all set to `value`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u16>::filled(20, true);
    /// assert_eq!(bitset.count(), 20);
    /// assert!(bitset.all());
    /// ```
    #[must_use]
    pub fn filled(bits: usize, value: bool) -> Self {
        let mut bitset = Self {
            blocks: vec![B::splat(value); blocks_required::<B>(bits)],
            bits,
        };
        bitset.sanitize();
        bitset
    }

    /// Creates a bitset from whole blocks, least-significant first.
    ///
    /// The size is exactly the number of blocks times `B::BITS`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::from_blocks([0x0Fu8, 0xF0]);
    /// assert_eq!(bitset.len(), 16);
    /// assert_eq!(bitset.to_string(), "1111000000001111");
    /// ```
    #[must_use]
    pub fn from_blocks<I: IntoIterator<Item = B>>(blocks: I) -> Self {
        let mut builder = DynamicBitsetBuilder::new();
        builder.extend(blocks);
        builder.finalize()
    }

    /// Reassembles a bitset from its blocks and size.
    ///
    /// Returns `None` unless `blocks.len()` is exactly the number of blocks
    /// `bits` requires and the unused tail bits of the last block are zero.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// assert!(DynamicBitset::from_raw_parts(vec![0b0101u8], 4).is_some());
    /// assert!(DynamicBitset::from_raw_parts(vec![0b1_0101u8], 4).is_none());
    /// assert!(DynamicBitset::from_raw_parts(vec![0u8, 0], 4).is_none());
    /// ```
    #[must_use]
    pub fn from_raw_parts(blocks: Vec<B>, bits: usize) -> Option<Self> {
        let bitset = Self { blocks, bits };
        bitset.check_consistency().then_some(bitset)
    }

    /// Parses `len` characters of `s` starting at character offset `pos`,
    /// using `zero` and `one` as the two digit symbols.
    ///
    /// The last parsed character becomes bit 0. Fewer than `len` characters
    /// are read when the input runs out first, so `usize::MAX` reads the
    /// whole remainder.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBitsetError::OutOfRange`] if `pos` is past the end of
    /// `s`, or [`ParseBitsetError::InvalidChar`] when a parsed character is
    /// neither `zero` nor `one`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u8>::from_str_with("xx..##..", 2, 4, '.', '#')?;
    /// assert_eq!(bitset.to_string(), "0011");
    /// # Ok::<(), dyn_bitset::ParseBitsetError>(())
    /// ```
    pub fn from_str_with(
        s: &str,
        pos: usize,
        len: usize,
        zero: char,
        one: char,
    ) -> Result<Self, ParseBitsetError> {
        let chars: Vec<char> = s.chars().collect();
        if pos > chars.len() {
            debug_event!(pos, len = chars.len(), "bitset text offset out of range");
            return Err(ParseBitsetError::OutOfRange {
                pos,
                len: chars.len(),
            });
        }

        let digits = &chars[pos..];
        let digits = &digits[..len.min(digits.len())];
        let mut bitset = Self::with_value(digits.len(), 0);
        for (i, &ch) in digits.iter().rev().enumerate() {
            if ch == one {
                bitset.set(i, true);
            } else if ch != zero {
                let at = pos + digits.len() - 1 - i;
                debug_event!(?ch, pos = at, "invalid character in bitset text");
                return Err(ParseBitsetError::InvalidChar { ch, pos: at });
            }
        }
        Ok(bitset)
    }

    // ========================================================================
    // Size and Capacity
    // ========================================================================

    /// Number of bits in the bitset.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.bits
    }

    /// Returns `true` if the bitset holds no bits.
    ///
    /// This is about the size, not the content: see [`none`](Self::none).
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of blocks in use.
    #[must_use]
    #[inline(always)]
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Number of bits the bitset can hold without reallocating.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks.capacity() * B::BITS
    }

    /// Reserves storage for at least `bits` bits in total.
    ///
    /// Never changes the size.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::new();
    /// bitset.reserve(100);
    /// assert!(bitset.capacity() >= 100);
    /// assert_eq!(bitset.len(), 0);
    /// ```
    pub fn reserve(&mut self, bits: usize) {
        let required = blocks_required::<B>(bits);
        if required > self.blocks.capacity() {
            self.blocks.reserve(required - self.blocks.len());
            trace_event!(
                blocks = required,
                capacity = self.blocks.capacity(),
                "reserved bitset storage"
            );
        }
    }

    /// Releases unused storage.
    pub fn shrink_to_fit(&mut self) {
        if self.blocks.capacity() > self.blocks.len() {
            self.blocks.shrink_to_fit();
            trace_event!(
                blocks = self.blocks.len(),
                capacity = self.blocks.capacity(),
                "shrunk bitset storage"
            );
        }
    }

    /// Removes every bit, keeping the allocation.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.bits = 0;
    }

    /// Grows or shrinks the bitset to `bits` bits.
    ///
    /// Bits added by growth are set to `value`, including the previously
    /// unused tail bits of the old last block.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(3, 0b101);
    /// bitset.resize(10, true);
    /// assert_eq!(bitset.to_string(), "1111111101");
    ///
    /// bitset.resize(2, false);
    /// assert_eq!(bitset.to_string(), "01");
    /// assert_eq!(bitset.num_blocks(), 1);
    /// ```
    pub fn resize(&mut self, bits: usize, value: bool) {
        if bits == self.bits {
            return;
        }

        let old_blocks = self.blocks.len();
        let new_blocks = blocks_required::<B>(bits);
        let fill = B::splat(value);

        if value && bits > self.bits && old_blocks > 0 {
            let extra = self.extra_bits();
            if extra > 0 {
                self.blocks[old_blocks - 1] |= fill << extra;
            }
        }
        if new_blocks != old_blocks {
            self.blocks.resize(new_blocks, fill);
            trace_event!(from = old_blocks, to = new_blocks, "resized bitset blocks");
        }

        self.bits = bits;
        self.sanitize();
        debug_assert_consistent!(self);
    }

    /// Appends one bit.
    ///
    /// A new block is allocated only when the current size fills every
    /// block; the underlying vector grows geometrically.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u64>::new();
    /// for i in 0..65 {
    ///     bitset.push(i % 2 == 0);
    /// }
    /// assert_eq!(bitset.num_blocks(), 2);
    /// assert!(bitset.test(64));
    /// ```
    pub fn push(&mut self, value: bool) {
        let pos = self.bits;
        self.bits += 1;
        if self.bits <= self.blocks.len() * B::BITS {
            if value {
                self.set(pos, true);
            }
        } else {
            self.blocks.push(B::from_bool(value));
        }
        debug_assert_consistent!(self);
    }

    /// Removes the last bit and returns it, or `None` if the bitset is
    /// empty.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(9, 0x100);
    /// assert_eq!(bitset.pop(), Some(true));
    /// assert_eq!(bitset.num_blocks(), 1);
    /// assert_eq!(bitset.pop(), Some(false));
    ///
    /// let mut empty = DynamicBitset::<u8>::new();
    /// assert_eq!(empty.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<bool> {
        if self.bits == 0 {
            return None;
        }

        let value = self.test(self.bits - 1);
        self.bits -= 1;
        if self.blocks.len() > blocks_required::<B>(self.bits) {
            // The dropped block held the only remaining bit.
            self.blocks.pop();
        } else {
            self.sanitize();
        }
        debug_assert_consistent!(self);
        Some(value)
    }

    /// Appends a whole block of bits above the current last bit.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(4, 0b1001);
    /// bitset.append(0xFF);
    /// assert_eq!(bitset.len(), 12);
    /// assert_eq!(bitset.to_string(), "111111111001");
    /// ```
    pub fn append(&mut self, block: B) {
        let extra = self.extra_bits();
        if extra == 0 {
            self.blocks.push(block);
        } else {
            *self.last_block_mut() |= block << extra;
            self.blocks.push(block >> (B::BITS - extra));
        }
        self.bits += B::BITS;
        debug_assert_consistent!(self);
    }

    /// Appends whole blocks of bits, least-significant first.
    ///
    /// When the current size is not block-aligned each block is split
    /// across the current partial block and a new one.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(2, 0b11);
    /// bitset.append_blocks([0x00, 0xFF]);
    /// assert_eq!(bitset.len(), 18);
    /// assert_eq!(bitset.as_blocks(), &[0x03, 0xFC, 0x03]);
    /// ```
    pub fn append_blocks<I: IntoIterator<Item = B>>(&mut self, blocks: I) {
        let mut iter = blocks.into_iter();
        let old_blocks = self.blocks.len();
        self.blocks.reserve(iter.size_hint().0);

        let extra = self.extra_bits();
        if extra == 0 {
            self.blocks.extend(iter);
            self.bits += (self.blocks.len() - old_blocks) * B::BITS;
        } else {
            let Some(first) = iter.next() else {
                return;
            };
            let unused = B::BITS - extra;
            *self.last_block_mut() |= first << extra;
            let mut carry = first >> unused;
            for block in iter {
                self.blocks.push(carry | (block << extra));
                carry = block >> unused;
            }
            self.blocks.push(carry);
            self.bits += (self.blocks.len() - old_blocks) * B::BITS;
        }
        trace_event!(
            from = old_blocks,
            to = self.blocks.len(),
            "appended blocks to bitset"
        );
        debug_assert_consistent!(self);
    }

    // ========================================================================
    // Single Bit Access
    // ========================================================================

    /// Returns the value of the bit at `pos`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u8>::with_value(4, 0b0100);
    /// assert!(bitset.test(2));
    /// assert!(!bitset.test(3));
    /// ```
    #[must_use]
    #[inline]
    pub fn test(&self, pos: usize) -> bool {
        debug_assert!(pos < self.bits, "bit {pos} out of range for {} bits", self.bits);
        let (idx, _) = bitpos!(B, pos);
        self.blocks[idx] & bit_mask::<B>(pos) != B::ZERO
    }

    /// Returns the value of the bit at `pos`, or `None` if `pos` is out of
    /// range.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u8>::with_value(4, 0b0100);
    /// assert_eq!(bitset.get(2), Some(true));
    /// assert_eq!(bitset.get(4), None);
    /// ```
    #[must_use]
    #[inline]
    pub fn get(&self, pos: usize) -> Option<bool> {
        (pos < self.bits).then(|| self.test(pos))
    }

    /// Returns a mutable proxy for the bit at `pos`.
    ///
    /// The proxy borrows the bitset, so no operation that reallocates can
    /// run while it is alive.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(4, 0);
    /// bitset.bit_mut(1).set();
    /// let mut bit = bitset.bit_mut(2);
    /// bit |= true;
    /// assert_eq!(bitset.to_string(), "0110");
    /// ```
    #[must_use]
    pub fn bit_mut(&mut self, pos: usize) -> BitRef<'_, B> {
        debug_assert!(pos < self.bits, "bit {pos} out of range for {} bits", self.bits);
        let (idx, _) = bitpos!(B, pos);
        BitRef::new(&mut self.blocks[idx], bit_mask::<B>(pos))
    }

    /// Sets the bit at `pos` to `value`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u16>::with_value(10, 0);
    /// bitset.set(3, true);
    /// assert!(bitset.test(3));
    /// bitset.set(3, false);
    /// assert!(!bitset.test(3));
    /// ```
    #[inline]
    pub fn set(&mut self, pos: usize, value: bool) {
        debug_assert!(pos < self.bits, "bit {pos} out of range for {} bits", self.bits);
        let (idx, _) = bitpos!(B, pos);
        let mask = bit_mask::<B>(pos);
        if value {
            self.blocks[idx] |= mask;
        } else {
            self.blocks[idx] &= !mask;
        }
    }

    /// Clears the bit at `pos`.
    #[inline]
    pub fn reset(&mut self, pos: usize) {
        self.set(pos, false);
    }

    /// Complements the bit at `pos`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(3, 0b001);
    /// bitset.flip(0);
    /// bitset.flip(2);
    /// assert_eq!(bitset.to_string(), "100");
    /// ```
    #[inline]
    pub fn flip(&mut self, pos: usize) {
        debug_assert!(pos < self.bits, "bit {pos} out of range for {} bits", self.bits);
        let (idx, _) = bitpos!(B, pos);
        self.blocks[idx] ^= bit_mask::<B>(pos);
    }

    /// Sets the bit at `pos` to `value` and returns its previous value.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(8, 0);
    /// assert!(!bitset.test_set(5, true));
    /// assert!(bitset.test_set(5, false));
    /// assert!(!bitset.test(5));
    /// ```
    pub fn test_set(&mut self, pos: usize, value: bool) -> bool {
        let prev = self.test(pos);
        if prev != value {
            self.set(pos, value);
        }
        prev
    }

    // ========================================================================
    // Range Operations
    // ========================================================================

    /// Applies `op(block, mask)` to the blocks covering `[pos, pos + len)`.
    ///
    /// Partial head and tail blocks receive a range mask, every block in
    /// between receives [`Block::ALL`] exactly once.
    fn update_range(&mut self, pos: usize, len: usize, op: impl Fn(&mut B, B)) {
        if len == 0 {
            return;
        }
        debug_assert!(pos < self.bits, "bit {pos} out of range for {} bits", self.bits);
        let last = pos + len - 1;
        debug_assert!(last < self.bits, "range end {last} out of range for {} bits", self.bits);

        let (first_block, first_bit) = bitpos!(B, pos);
        let (last_block, last_bit) = bitpos!(B, last);

        if first_block == last_block {
            op(&mut self.blocks[first_block], range_mask::<B>(pos, last));
            return;
        }

        let mut full_start = first_block;
        let mut full_end = last_block + 1;

        if first_bit != 0 {
            op(&mut self.blocks[first_block], range_mask::<B>(pos, B::BITS - 1));
            full_start += 1;
        }
        if last_bit != B::BITS - 1 {
            op(&mut self.blocks[last_block], range_mask::<B>(0, last));
            full_end -= 1;
        }

        for block in &mut self.blocks[full_start..full_end] {
            op(block, B::ALL);
        }
    }

    /// Sets every bit in `[pos, pos + len)` to `value`.
    ///
    /// A zero `len` is a no-op, even with `pos == len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(20, 0);
    /// bitset.set_range(3, 14, true);
    /// assert_eq!(bitset.to_string(), "00011111111111111000");
    ///
    /// bitset.set_range(5, 2, false);
    /// assert_eq!(bitset.to_string(), "00011111111110011000");
    /// ```
    pub fn set_range(&mut self, pos: usize, len: usize, value: bool) {
        if value {
            self.update_range(pos, len, |block, mask| *block |= mask);
        } else {
            self.update_range(pos, len, |block, mask| *block &= !mask);
        }
    }

    /// Clears every bit in `[pos, pos + len)`.
    pub fn reset_range(&mut self, pos: usize, len: usize) {
        self.set_range(pos, len, false);
    }

    /// Complements every bit in `[pos, pos + len)`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(10, 0b00_1111_0000);
    /// bitset.flip_range(2, 6);
    /// assert_eq!(bitset.to_string(), "0000001100");
    /// ```
    pub fn flip_range(&mut self, pos: usize, len: usize) {
        self.update_range(pos, len, |block, mask| *block ^= mask);
    }

    /// Sets every bit.
    pub fn set_all(&mut self) {
        self.blocks.fill(B::ALL);
        self.sanitize();
    }

    /// Clears every bit, keeping the size.
    pub fn reset_all(&mut self) {
        self.blocks.fill(B::ZERO);
    }

    /// Complements every bit.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(5, 0b00110);
    /// bitset.flip_all();
    /// assert_eq!(bitset.to_string(), "11001");
    /// ```
    pub fn flip_all(&mut self) {
        for block in &mut self.blocks {
            *block = !*block;
        }
        self.sanitize();
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Number of set bits.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset: DynamicBitset<u8> = "10110100101".parse()?;
    /// assert_eq!(bitset.count(), 6);
    /// # Ok::<(), dyn_bitset::ParseBitsetError>(())
    /// ```
    #[must_use]
    pub fn count(&self) -> usize {
        let Some((&last, full)) = self.blocks.split_last() else {
            return 0;
        };

        let mut count: usize = full.iter().map(|block| block.popcount()).sum();
        if last != B::ZERO {
            count += match self.extra_bits() {
                0 => last.popcount(),
                extra => (last << (B::BITS - extra)).popcount(),
            };
        }
        count
    }

    /// Returns `true` if at least one bit is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.blocks.iter().any(|&block| block != B::ZERO)
    }

    /// Returns `true` if no bit is set. Vacuously true when empty.
    #[must_use]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Returns `true` if every bit is set. Vacuously true when empty.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// assert!(DynamicBitset::<u8>::new().all());
    /// assert!(DynamicBitset::<u8>::filled(13, true).all());
    /// assert!(!DynamicBitset::<u8>::with_value(13, 0x0FFF).all());
    /// ```
    #[must_use]
    pub fn all(&self) -> bool {
        let Some((&last, full)) = self.blocks.split_last() else {
            return true;
        };
        full.iter().all(|&block| block == B::ALL) && last == used_mask::<B>(self.bits)
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    /// Position of the lowest set bit, or `None` if no bit is set.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u8>::with_value(30, 1 << 17);
    /// assert_eq!(bitset.find_first(), Some(17));
    /// assert_eq!(DynamicBitset::<u8>::with_value(30, 0).find_first(), None);
    /// ```
    #[must_use]
    pub fn find_first(&self) -> Option<usize> {
        self.blocks
            .iter()
            .position(|&block| block != B::ZERO)
            .map(|idx| idx * B::BITS + self.blocks[idx].lowest_set_bit())
    }

    /// Position of the lowest set bit strictly after `prev`, or `None`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u8>::with_value(30, (1 << 3) | (1 << 4) | (1 << 25));
    /// assert_eq!(bitset.find_next(3), Some(4));
    /// assert_eq!(bitset.find_next(4), Some(25));
    /// assert_eq!(bitset.find_next(25), None);
    /// assert_eq!(bitset.find_next(100), None);
    /// ```
    #[must_use]
    pub fn find_next(&self, prev: usize) -> Option<usize> {
        if self.bits == 0 || prev >= self.bits - 1 {
            return None;
        }

        let first = prev + 1;
        let (idx, bp) = bitpos!(B, first);
        let shifted = self.blocks[idx] >> bp;
        if shifted != B::ZERO {
            return Some(first + shifted.lowest_set_bit());
        }

        self.blocks[idx + 1..]
            .iter()
            .position(|&block| block != B::ZERO)
            .map(|rel| {
                let idx = idx + 1 + rel;
                idx * B::BITS + self.blocks[idx].lowest_set_bit()
            })
    }

    /// Returns an iterator over the positions of set bits, ascending.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u8>::with_value(12, 0b1000_0010_0001);
    /// assert_eq!(bitset.ones().collect::<Vec<_>>(), vec![0, 5, 11]);
    /// assert_eq!(bitset.ones().rev().collect::<Vec<_>>(), vec![11, 5, 0]);
    /// ```
    #[must_use]
    pub fn ones(&self) -> Ones<'_, B> {
        Ones::new(&self.blocks)
    }

    /// Calls `f` with the position of every set bit in ascending order,
    /// stopping early when `f` returns [`ControlFlow::Break`].
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// use core::ops::ControlFlow;
    ///
    /// let bitset = DynamicBitset::<u8>::with_value(16, 0b1010_1010);
    /// let mut seen = Vec::new();
    /// let flow = bitset.for_each_one(|pos| {
    ///     seen.push(pos);
    ///     if pos >= 5 { ControlFlow::Break(pos) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(flow, ControlFlow::Break(5));
    /// assert_eq!(seen, vec![1, 3, 5]);
    /// ```
    pub fn for_each_one<T, F>(&self, mut f: F) -> ControlFlow<T>
    where
        F: FnMut(usize) -> ControlFlow<T>,
    {
        let mut next = self.find_first();
        while let Some(pos) = next {
            if let ControlFlow::Break(value) = f(pos) {
                return ControlFlow::Break(value);
            }
            next = self.find_next(pos);
        }
        ControlFlow::Continue(())
    }

    // ========================================================================
    // Raw Block Access
    // ========================================================================

    /// The underlying blocks, least-significant first.
    ///
    /// Unused tail bits of the last block are always zero.
    #[must_use]
    #[inline(always)]
    pub fn as_blocks(&self) -> &[B] {
        &self.blocks
    }

    /// A mutable view over the underlying blocks.
    ///
    /// Unused tail bits written through the view are cleared when the view
    /// is dropped.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset = DynamicBitset::<u8>::with_value(6, 0);
    /// bitset.blocks_mut()[0] = 0xFF;
    /// assert_eq!(bitset.as_blocks(), &[0b0011_1111]);
    /// assert_eq!(bitset.count(), 6);
    /// ```
    #[must_use]
    pub fn blocks_mut(&mut self) -> BlocksMut<'_, B> {
        BlocksMut::new(self)
    }

    /// Consumes the bitset, returning its blocks.
    #[must_use]
    pub fn into_blocks(self) -> Vec<B> {
        self.blocks
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Renders the bits most-significant first using `zero` and `one`.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let bitset = DynamicBitset::<u8>::with_value(6, 0b10_0110);
    /// assert_eq!(bitset.to_string_with('.', '#'), "#..##.");
    /// ```
    #[must_use]
    pub fn to_string_with(&self, zero: char, one: char) -> String {
        let mut out = String::with_capacity(self.bits);
        for pos in (0..self.bits).rev() {
            out.push(if self.test(pos) { one } else { zero });
        }
        out
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Number of used bits in the last block, zero when block-aligned.
    #[inline(always)]
    pub(crate) fn extra_bits(&self) -> usize {
        bitpos!(B, self.bits).1
    }

    #[inline(always)]
    fn last_block_mut(&mut self) -> &mut B {
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// Clears the unused tail bits of the last block.
    #[inline]
    pub(crate) fn sanitize(&mut self) {
        let mask = used_mask::<B>(self.bits);
        if let Some(last) = self.blocks.last_mut() {
            *last &= mask;
        }
    }

    /// Returns `true` if the block count matches the size and the unused
    /// tail bits of the last block are zero.
    ///
    /// Every public operation preserves this; it is exposed for callers
    /// that build bitsets through [`blocks_mut`](Self::blocks_mut).
    #[must_use]
    pub fn check_consistency(&self) -> bool {
        if self.blocks.len() != blocks_required::<B>(self.bits) {
            return false;
        }
        self.blocks
            .last()
            .is_none_or(|&last| last & !used_mask::<B>(self.bits) == B::ZERO)
    }

    /// Swaps contents with `other` without reallocating.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}
