//! Size-preserving shifts.
//!
//! `bitset <<= n` moves every bit towards the most significant end, dropping
//! bits pushed past `len() - 1` and filling the vacated low positions with
//! zeros. `>>=` mirrors it. Shifting by `len()` or more clears the bitset.

use core::ops::{Shl, ShlAssign, Shr, ShrAssign};

use crate::{Block, DynamicBitset, macros::bitpos};

impl<B: Block> DynamicBitset<B> {
    fn shift_left(&mut self, shift: usize) {
        if shift == 0 {
            return;
        }
        if shift >= self.bits {
            self.reset_all();
            return;
        }

        let (block_shift, offset) = bitpos!(B, shift);
        let blocks = &mut self.blocks;
        let n = blocks.len();

        if offset == 0 {
            blocks.copy_within(..n - block_shift, block_shift);
        } else {
            let back = B::BITS - offset;
            for i in (block_shift + 1..n).rev() {
                blocks[i] = (blocks[i - block_shift] << offset)
                    | (blocks[i - block_shift - 1] >> back);
            }
            blocks[block_shift] = blocks[0] << offset;
        }
        blocks[..block_shift].fill(B::ZERO);

        self.sanitize();
    }

    fn shift_right(&mut self, shift: usize) {
        if shift == 0 {
            return;
        }
        if shift >= self.bits {
            self.reset_all();
            return;
        }

        let (block_shift, offset) = bitpos!(B, shift);
        let blocks = &mut self.blocks;
        let n = blocks.len();
        let last = n - block_shift - 1;

        if offset == 0 {
            blocks.copy_within(block_shift.., 0);
        } else {
            let back = B::BITS - offset;
            for i in 0..last {
                blocks[i] = (blocks[i + block_shift] >> offset)
                    | (blocks[i + block_shift + 1] << back);
            }
            blocks[last] = blocks[n - 1] >> offset;
        }
        blocks[last + 1..].fill(B::ZERO);
    }
}

impl<B: Block> ShlAssign<usize> for DynamicBitset<B> {
    /// Shifts every bit towards the most significant end.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset: DynamicBitset<u8> = "00001".parse()?;
    /// bitset <<= 3;
    /// assert_eq!(bitset.to_string(), "01000");
    /// # Ok::<(), dyn_bitset::ParseBitsetError>(())
    /// ```
    fn shl_assign(&mut self, shift: usize) {
        self.shift_left(shift);
    }
}

impl<B: Block> ShrAssign<usize> for DynamicBitset<B> {
    /// Shifts every bit towards the least significant end.
    ///
    /// ```
    /// # use dyn_bitset::DynamicBitset;
    /// let mut bitset: DynamicBitset<u8> = "01000".parse()?;
    /// bitset >>= 4;
    /// assert_eq!(bitset.to_string(), "00000");
    /// # Ok::<(), dyn_bitset::ParseBitsetError>(())
    /// ```
    fn shr_assign(&mut self, shift: usize) {
        self.shift_right(shift);
    }
}

impl<B: Block> Shl<usize> for DynamicBitset<B> {
    type Output = Self;

    fn shl(mut self, shift: usize) -> Self {
        self <<= shift;
        self
    }
}

impl<B: Block> Shr<usize> for DynamicBitset<B> {
    type Output = Self;

    fn shr(mut self, shift: usize) -> Self {
        self >>= shift;
        self
    }
}

impl<B: Block> Shl<usize> for &DynamicBitset<B> {
    type Output = DynamicBitset<B>;

    fn shl(self, shift: usize) -> DynamicBitset<B> {
        self.clone() << shift
    }
}

impl<B: Block> Shr<usize> for &DynamicBitset<B> {
    type Output = DynamicBitset<B>;

    fn shr(self, shift: usize) -> DynamicBitset<B> {
        self.clone() >> shift
    }
}
