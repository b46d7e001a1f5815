//! Iterator implementations for `DynamicBitset`.

use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    iter::{FromIterator, FusedIterator},
    marker::PhantomData,
};

use crate::{Block, DynamicBitset, macros::bitpos};

/// An iterator over the positions of set bits in a [`DynamicBitset`].
///
/// Created by [`DynamicBitset::ones`]. Yields positions in ascending order.
pub type Ones<'a, B = u64> = BitIter<&'a [B], B>;

/// An owning iterator over the positions of set bits in a [`DynamicBitset`].
///
/// Created by the [`IntoIterator`] implementation for [`DynamicBitset`].
pub type IntoOnes<B = u64> = BitIter<Vec<B>, B>;

/// An iterator over the positions of set bits in a block slice.
///
/// Double-ended and exact-size. Runs of zero blocks are skipped a whole
/// block at a time. `S` is either a borrowed slice or an owned vector.
///
/// # Examples
///
/// ```
/// use dyn_bitset::DynamicBitset;
///
/// let mut bitset = DynamicBitset::<u16>::with_value(40, 0);
/// bitset.set(5, true);
/// bitset.set(20, true);
/// bitset.set(33, true);
///
/// let mut ones = bitset.ones();
/// assert_eq!(ones.len(), 3);
/// assert_eq!(ones.next(), Some(5));
/// assert_eq!(ones.next_back(), Some(33));
/// assert_eq!(ones.collect::<Vec<_>>(), vec![20]);
/// ```
#[derive(Clone)]
pub struct BitIter<S: Borrow<[B]>, B: Block> {
    blocks: S,
    pos: usize,  // next candidate, forward
    rpos: usize, // one past the last candidate, reverse
    _block: PhantomData<B>,
}

impl<S: Borrow<[B]>, B: Block> BitIter<S, B> {
    pub(crate) fn new(blocks: S) -> Self {
        let rpos = blocks.borrow().len() * B::BITS;
        Self {
            blocks,
            pos: 0,
            rpos,
            _block: PhantomData,
        }
    }
}

impl<S: Borrow<[B]>, B: Block> Iterator for BitIter<S, B> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let slice = self.blocks.borrow();

        while self.pos < self.rpos {
            let (mut bi, bp) = bitpos!(B, self.pos);

            let block = slice[bi] >> bp;
            if block == B::ZERO {
                bi += 1;
                while bi < slice.len() && slice[bi] == B::ZERO {
                    bi += 1;
                }
                self.pos = bi * B::BITS;
                continue;
            }

            let result = self.pos + block.lowest_set_bit();
            if result >= self.rpos {
                self.pos = self.rpos;
                return None;
            }
            self.pos = result + 1;
            return Some(result);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<S: Borrow<[B]>, B: Block> ExactSizeIterator for BitIter<S, B> {
    fn len(&self) -> usize {
        if self.pos >= self.rpos {
            return 0;
        }

        let slice = self.blocks.borrow();
        let (bmin, pmin) = bitpos!(B, self.pos);
        let (bmax, pmax) = bitpos!(B, self.rpos);

        // Bits at or above `pmin` in the first block, below `pmax` in the last.
        let head = B::ALL << pmin;
        let tail = |p: usize| if p == 0 { B::ZERO } else { !(B::ALL << p) };

        if bmin == bmax {
            return (slice[bmin] & head & tail(pmax)).popcount();
        }

        let mut count = (slice[bmin] & head).popcount();
        count += slice[bmin + 1..bmax]
            .iter()
            .map(|block| block.popcount())
            .sum::<usize>();
        if bmax < slice.len() {
            count += (slice[bmax] & tail(pmax)).popcount();
        }
        count
    }
}

impl<S: Borrow<[B]>, B: Block> FusedIterator for BitIter<S, B> {}

impl<S: Borrow<[B]>, B: Block> DoubleEndedIterator for BitIter<S, B> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let slice = self.blocks.borrow();

        while self.rpos > self.pos {
            let (bi, bp) = bitpos!(B, self.rpos - 1);

            // Keep bits up to and including `bp`.
            let mask = if bp == B::BITS - 1 {
                B::ALL
            } else {
                !(B::ALL << (bp + 1))
            };
            let block = slice[bi] & mask;
            if block == B::ZERO {
                self.rpos = bi * B::BITS;
                continue;
            }

            let result = bi * B::BITS + block.highest_set_bit();
            if result < self.pos {
                self.rpos = self.pos;
                return None;
            }
            self.rpos = result;
            return Some(result);
        }

        None
    }
}

impl<'a, B: Block> IntoIterator for &'a DynamicBitset<B> {
    type IntoIter = Ones<'a, B>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.ones()
    }
}

impl<B: Block> IntoIterator for DynamicBitset<B> {
    type IntoIter = IntoOnes<B>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        BitIter::new(self.into_blocks())
    }
}

impl<B: Block> FromIterator<bool> for DynamicBitset<B> {
    /// Collects bits in order, the first item becoming bit 0.
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut bitset = Self::with_capacity(iter.size_hint().0);
        bitset.extend(iter);
        bitset
    }
}

impl<B: Block> Extend<bool> for DynamicBitset<B> {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(self.len() + iter.size_hint().0);
        for bit in iter {
            self.push(bit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn test_forward_skips_zero_blocks() {
        let bitset = DynamicBitset::<u8>::from_blocks([0, 0, 0x81, 0, 0, 0x10]);
        assert_eq!(bitset.ones().collect::<Vec<_>>(), vec![16, 23, 44]);
    }

    #[test]
    fn test_len_tracks_both_ends() {
        let bitset = DynamicBitset::<u8>::from_blocks([0xFF, 0x0F, 0xF0]);
        let mut ones = bitset.ones();
        assert_eq!(ones.len(), 16);
        ones.next();
        ones.next();
        assert_eq!(ones.len(), 14);
        ones.next_back();
        assert_eq!(ones.len(), 13);
        assert_eq!(ones.next_back(), Some(22));
        assert_eq!(ones.len(), 12);
    }

    #[test]
    fn test_meet_in_the_middle() {
        let bitset = DynamicBitset::<u32>::with_value(32, 0b1_0110);
        let mut ones = bitset.ones();
        assert_eq!(ones.next(), Some(1));
        assert_eq!(ones.next_back(), Some(4));
        assert_eq!(ones.next(), Some(2));
        assert_eq!(ones.next(), None);
        assert_eq!(ones.next_back(), None);
        assert_eq!(ones.len(), 0);
    }

    #[test]
    fn test_empty() {
        let bitset = DynamicBitset::<u64>::new();
        assert_eq!(bitset.ones().next(), None);
        assert_eq!(bitset.ones().next_back(), None);
        assert_eq!(bitset.ones().len(), 0);
    }

    #[test]
    fn test_into_iter_owned() {
        let bitset = DynamicBitset::<u16>::with_value(70, 0x8001);
        let ones: Vec<_> = bitset.into_iter().collect();
        assert_eq!(ones, vec![0, 15]);
    }

    #[test]
    fn test_collect_bools() {
        let bitset: DynamicBitset<u8> = [true, false, true, true, false, false, false, false, true]
            .into_iter()
            .collect();
        assert_eq!(bitset.len(), 9);
        assert_eq!(bitset.as_blocks(), &[0b0000_1101, 0b1]);

        let mut extended = bitset.clone();
        extended.extend([false, true]);
        assert_eq!(extended.to_string(), "10100001101");
    }
}
