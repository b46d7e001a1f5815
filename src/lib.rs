//! A runtime-resizable bitset packed into fixed-width blocks.
//!
//! This crate provides [`DynamicBitset`], a dense vector of bits whose size is
//! chosen and changed at runtime. Bits are packed into blocks of an unsigned
//! integer type chosen by the caller (`u64` by default) and every operation
//! works a whole block at a time where it can.
//!
//! # Features
//!
//! - **Resizing**: [`resize`](DynamicBitset::resize),
//!   [`push`](DynamicBitset::push), [`pop`](DynamicBitset::pop) and block
//!   [`append`](DynamicBitset::append) with amortized growth
//! - **Range operations** that touch each interior block once
//! - **Logical operators** `&`, `|`, `^`, `-`, `!` and size-preserving shifts
//!   `<<`, `>>`
//! - **Scanning** for set bits with [`find_first`](DynamicBitset::find_first),
//!   [`find_next`](DynamicBitset::find_next) and the [`Ones`] iterator
//! - **Text form** through [`Display`](core::fmt::Display) and
//!   [`FromStr`](core::str::FromStr), with custom digit characters available
//! - **Serialization support** via serde (optional)
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use dyn_bitset::DynamicBitset;
//!
//! let mut bitset: DynamicBitset<u8> = "10110100101".parse()?;
//! assert_eq!(bitset.len(), 11);
//! assert_eq!(bitset.count(), 6);
//! assert_eq!(bitset.find_first(), Some(0));
//!
//! bitset.set_range(4, 3, false);
//! bitset.push(true);
//! assert_eq!(bitset.to_string(), "110110000101");
//!
//! let mask = DynamicBitset::filled(12, true) >> 6;
//! assert_eq!((&bitset & &mask).to_string(), "000000000101");
//!
//! for pos in &bitset {
//!     assert!(bitset.test(pos));
//! }
//! # Ok::<(), dyn_bitset::ParseBitsetError>(())
//! ```
//!
//! # Layout
//!
//! Bit `i` lives in block `i / B::BITS` at position `i % B::BITS`. Blocks are
//! stored least-significant first and the bits of the last block beyond
//! [`len`](DynamicBitset::len) are kept at zero, so the blocks returned by
//! [`as_blocks`](DynamicBitset::as_blocks) read as a little-endian unsigned
//! integer.
//!
//! # Cargo features
//!
//! - `std` (default): `std::error::Error` for the error types
//! - `serde`: `Serialize` and `Deserialize`
//! - `tracing`: `tracing` events on storage growth and rejected input
//! - `portable`: software popcount and bit scans instead of intrinsics

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod bitset;
mod block;
mod iter;
mod macros;
mod reference;
mod set_ops;
mod shift;
pub mod storage;
pub mod traits;

#[cfg(feature = "serde")]
pub mod serde;

pub use bitset::DynamicBitset;
pub use block::{Block, portable};
pub use iter::{BitIter, IntoOnes, Ones};
pub use reference::{BitRef, BlocksMut};
pub use storage::DynamicBitsetBuilder;
pub use traits::{ParseBitsetError, TryFromBitsetError};

/// Sentinel for "no position", for callers that want the result of
/// [`find_first`](DynamicBitset::find_first) or
/// [`find_next`](DynamicBitset::find_next) as a plain `usize`.
///
/// ```
/// use dyn_bitset::{DynamicBitset, NPOS};
///
/// let bitset = DynamicBitset::<u8>::with_value(8, 0);
/// assert_eq!(bitset.find_first().unwrap_or(NPOS), NPOS);
/// ```
pub const NPOS: usize = usize::MAX;
