//! Serde implementations for `DynamicBitset`.
//!
//! Human-readable formats see the bit string (`"10110"`), compact formats a
//! `(bit count, blocks)` tuple. The [`blocks`] and [`ones`] modules provide
//! alternative encodings for use with `#[serde(with = "...")]`.

use alloc::vec::Vec;
use core::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
    ser::{SerializeSeq, SerializeTuple},
};

use crate::{Block, DynamicBitset, storage::blocks_required};

fn bit_count<E: de::Error>(bits: u64) -> Result<usize, E> {
    usize::try_from(bits)
        .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(bits), &"a bit count fitting in usize"))
}

/// Serialize and deserialize a [`DynamicBitset`] as a plain sequence of
/// blocks. The size on deserialization is the number of blocks times the
/// block width.
pub mod blocks {
    use super::*;

    /// Serialize the blocks of the bitset, least-significant first.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S, B>(bitset: &DynamicBitset<B>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        B: Block + Serialize,
    {
        bitset.as_blocks().serialize(serializer)
    }

    /// Deserialize a bitset from a sequence of blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a sequence of blocks.
    pub fn deserialize<'de, D, B>(deserializer: D) -> Result<DynamicBitset<B>, D::Error>
    where
        D: Deserializer<'de>,
        B: Block + Deserialize<'de>,
    {
        Vec::<B>::deserialize(deserializer).map(DynamicBitset::from)
    }
}

/// Serialize and deserialize a [`DynamicBitset`] as its size followed by the
/// ascending positions of its set bits.
///
/// Suited to sparse bitsets: `[100, 3, 97]` is a 100-bit bitset with bits 3
/// and 97 set.
pub mod ones {
    use super::*;

    /// Serialize the size, then every set position in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S, B>(bitset: &DynamicBitset<B>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        B: Block,
    {
        let ones = bitset.ones();
        let mut seq = serializer.serialize_seq(Some(ones.len() + 1))?;
        seq.serialize_element(&(bitset.len() as u64))?;
        for pos in ones {
            seq.serialize_element(&(pos as u64))?;
        }
        seq.end()
    }

    /// Deserialize a bitset from its size and ascending set positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is missing or its storage cannot be
    /// allocated, or if a position is not strictly greater than the previous
    /// one or not below the size.
    pub fn deserialize<'de, D, B>(deserializer: D) -> Result<DynamicBitset<B>, D::Error>
    where
        D: Deserializer<'de>,
        B: Block,
    {
        struct OnesVisitor<B>(PhantomData<B>);

        impl<'de, B: Block> Visitor<'de> for OnesVisitor<B> {
            type Value = DynamicBitset<B>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a bit count followed by ascending set positions")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let Some(bits) = seq.next_element::<u64>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                let len = bit_count::<A::Error>(bits)?;

                // Sized from untrusted input.
                let mut blocks = Vec::new();
                blocks
                    .try_reserve_exact(blocks_required::<B>(len))
                    .map_err(de::Error::custom)?;
                blocks.resize(blocks_required::<B>(len), B::ZERO);
                let mut bitset = DynamicBitset::from_parts_unchecked(blocks, len);

                let mut last = None;
                while let Some(pos) = seq.next_element::<u64>()? {
                    if let Some(last) = last
                        && last >= pos
                    {
                        return Err(de::Error::invalid_value(
                            de::Unexpected::Unsigned(pos),
                            &"ascending set positions",
                        ));
                    }
                    if pos >= bits {
                        return Err(de::Error::invalid_value(
                            de::Unexpected::Unsigned(pos),
                            &"a position below the bit count",
                        ));
                    }
                    last = Some(pos);
                    bitset.set(pos as usize, true);
                }
                Ok(bitset)
            }
        }

        deserializer.deserialize_seq(OnesVisitor(PhantomData))
    }
}

impl<B: Block + Serialize> Serialize for DynamicBitset<B> {
    /// Serialize as the bit string for human-readable formats and as a
    /// `(bit count, blocks)` tuple otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            let mut tuple = serializer.serialize_tuple(2)?;
            tuple.serialize_element(&(self.len() as u64))?;
            tuple.serialize_element(self.as_blocks())?;
            tuple.end()
        }
    }
}

impl<'de, B: Block + Deserialize<'de>> Deserialize<'de> for DynamicBitset<B> {
    /// Deserialize from the bit string or the `(bit count, blocks)` tuple,
    /// matching [`Serialize`].
    ///
    /// # Errors
    ///
    /// Returns an error for invalid characters, a block count that does not
    /// match the bit count, or set bits beyond the bit count.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            struct TextVisitor<B>(PhantomData<B>);

            impl<B: Block> Visitor<'_> for TextVisitor<B> {
                type Value = DynamicBitset<B>;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a string of '0' and '1' characters")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    v.parse().map_err(E::custom)
                }
            }

            deserializer.deserialize_str(TextVisitor(PhantomData))
        } else {
            struct PartsVisitor<B>(PhantomData<B>);

            impl<'de, B: Block + Deserialize<'de>> Visitor<'de> for PartsVisitor<B> {
                type Value = DynamicBitset<B>;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a bit count and a sequence of blocks")
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let Some(bits) = seq.next_element::<u64>()? else {
                        return Err(de::Error::invalid_length(0, &self));
                    };
                    let Some(blocks) = seq.next_element::<Vec<B>>()? else {
                        return Err(de::Error::invalid_length(1, &self));
                    };
                    let count = blocks.len();
                    DynamicBitset::from_raw_parts(blocks, bit_count::<A::Error>(bits)?).ok_or_else(|| {
                        de::Error::invalid_value(
                            de::Unexpected::Unsigned(count as u64),
                            &"blocks matching the bit count with a clear tail",
                        )
                    })
                }
            }

            deserializer.deserialize_tuple(2, PartsVisitor(PhantomData))
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use ::serde::{Deserialize, Serialize};
    use alloc::string::ToString;
    use serde_test::{Configure, Token, assert_de_tokens_error, assert_tokens};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct BlocksWrapper {
        #[serde(with = "blocks")]
        bitset: DynamicBitset<u16>,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct OnesWrapper {
        #[serde(with = "ones")]
        bitset: DynamicBitset<u8>,
    }

    // ========================================================================
    // Default format tests
    // ========================================================================

    #[test]
    fn test_readable_is_bit_string() {
        let bitset = DynamicBitset::<u8>::with_value(6, 0b10_0110);
        assert_tokens(&bitset.clone().readable(), &[Token::Str("100110")]);

        let empty = DynamicBitset::<u8>::new();
        assert_tokens(&empty.readable(), &[Token::Str("")]);
    }

    #[test]
    fn test_compact_is_count_and_blocks() {
        let bitset = DynamicBitset::<u8>::with_value(12, 0xABC);
        assert_tokens(
            &bitset.compact(),
            &[
                Token::Tuple { len: 2 },
                Token::U64(12),
                Token::Seq { len: Some(2) },
                Token::U8(0xBC),
                Token::U8(0x0A),
                Token::SeqEnd,
                Token::TupleEnd,
            ],
        );
    }

    #[test]
    fn test_readable_rejects_invalid_char() {
        assert_de_tokens_error::<serde_test::Readable<DynamicBitset<u8>>>(
            &[Token::Str("10a")],
            "invalid character 'a' at position 2 in bitset string",
        );
    }

    #[test]
    fn test_compact_rejects_block_count_mismatch() {
        assert_de_tokens_error::<serde_test::Compact<DynamicBitset<u8>>>(
            &[
                Token::Tuple { len: 2 },
                Token::U64(4),
                Token::Seq { len: Some(2) },
                Token::U8(0x01),
                Token::U8(0x00),
                Token::SeqEnd,
                Token::TupleEnd,
            ],
            "invalid value: integer `2`, expected blocks matching the bit count with a clear tail",
        );
    }

    #[test]
    fn test_compact_rejects_dirty_tail() {
        assert_de_tokens_error::<serde_test::Compact<DynamicBitset<u8>>>(
            &[
                Token::Tuple { len: 2 },
                Token::U64(4),
                Token::Seq { len: Some(1) },
                Token::U8(0x10),
                Token::SeqEnd,
                Token::TupleEnd,
            ],
            "invalid value: integer `1`, expected blocks matching the bit count with a clear tail",
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let bitset = DynamicBitset::<u32>::with_value(40, 0x80_0000_0001);
        let json = serde_json::to_string(&bitset).unwrap();
        assert_eq!(json, "\"1000000000000000000000000000000000000001\"");
        let back: DynamicBitset<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bitset);
    }

    #[test]
    fn test_postcard_roundtrip() {
        let mut bitset = DynamicBitset::<u64>::with_value(200, 0);
        bitset.set_range(60, 80, true);
        let bytes = postcard::to_allocvec(&bitset).unwrap();
        let back: DynamicBitset<u64> = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back, bitset);
        assert_eq!(back.count(), 80);
    }

    // ========================================================================
    // Blocks format tests
    // ========================================================================

    #[test]
    fn test_blocks_format() {
        let wrapper = BlocksWrapper {
            bitset: DynamicBitset::from_blocks([0x00FF, 0x8000]),
        };
        assert_tokens(
            &wrapper,
            &[
                Token::Struct {
                    name: "BlocksWrapper",
                    len: 1,
                },
                Token::Str("bitset"),
                Token::Seq { len: Some(2) },
                Token::U16(0x00FF),
                Token::U16(0x8000),
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }

    // ========================================================================
    // Ones format tests
    // ========================================================================

    #[test]
    fn test_ones_format() {
        let mut bitset = DynamicBitset::with_value(100, 0);
        bitset.set(3, true);
        bitset.set(97, true);
        let wrapper = OnesWrapper { bitset };
        assert_tokens(
            &wrapper,
            &[
                Token::Struct {
                    name: "OnesWrapper",
                    len: 1,
                },
                Token::Str("bitset"),
                Token::Seq { len: Some(3) },
                Token::U64(100),
                Token::U64(3),
                Token::U64(97),
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_ones_rejects_unsorted() {
        let err = serde_json::from_str::<OnesWrapper>(r#"{"bitset":[10,5,2]}"#).unwrap_err();
        assert!(err.to_string().contains("ascending set positions"), "{err}");
    }

    #[test]
    fn test_ones_rejects_out_of_range() {
        let err = serde_json::from_str::<OnesWrapper>(r#"{"bitset":[10,10]}"#).unwrap_err();
        assert!(err.to_string().contains("below the bit count"), "{err}");
    }

    #[test]
    fn test_ones_rejects_unallocatable_size() {
        let result = serde_json::from_str::<OnesWrapper>(r#"{"bitset":[18446744073709551615]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ones_roundtrip_json() {
        let bitset: DynamicBitset<u8> = "0001000000010000001".parse().unwrap();
        let json = serde_json::to_string(&OnesWrapper {
            bitset: bitset.clone(),
        })
        .unwrap();
        assert_eq!(json, r#"{"bitset":[19,0,7,15]}"#);
        let back: OnesWrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bitset, bitset);
    }
}
