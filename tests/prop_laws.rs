use std::cmp::Ordering;

use dyn_bitset::DynamicBitset;
use proptest::prelude::*;

// Strategy for bitsets built bit by bit, any size up to `max_bits`
prop_compose! {
    fn arb_bitset(max_bits: usize)
        (bits in prop::collection::vec(any::<bool>(), 0..max_bits))
        -> DynamicBitset<u8>
    {
        bits.into_iter().collect()
    }
}

// Strategy for two bitsets of the same size
prop_compose! {
    fn arb_pair(max_bits: usize)
        (len in 0..max_bits)
        (a in prop::collection::vec(any::<bool>(), len), b in prop::collection::vec(any::<bool>(), len))
        -> (DynamicBitset<u16>, DynamicBitset<u16>)
    {
        (a.into_iter().collect(), b.into_iter().collect())
    }
}

// Strategy for dense u64-block bitsets with an unaligned size
prop_compose! {
    fn dense_bitset()
        (blocks in prop::collection::vec(any::<u64>(), 1..=4), cut in 0usize..64)
        -> DynamicBitset<u64>
    {
        let mut bitset = DynamicBitset::from_blocks(blocks);
        let len = bitset.len() - cut;
        bitset.resize(len, false);
        bitset
    }
}

fn as_bools<B: dyn_bitset::Block>(bitset: &DynamicBitset<B>) -> Vec<bool> {
    (0..bitset.len()).map(|pos| bitset.test(pos)).collect()
}

proptest! {
    #[test]
    fn test_set_then_test(bitset in arb_bitset(200), seed in any::<prop::sample::Index>()) {
        prop_assume!(!bitset.is_empty());
        let pos = seed.index(bitset.len());

        let mut set = bitset.clone();
        set.set(pos, true);
        prop_assert!(set.test(pos));

        let mut reset = bitset.clone();
        reset.reset(pos);
        prop_assert!(!reset.test(pos));

        let mut flipped = bitset.clone();
        flipped.flip(pos);
        prop_assert_ne!(flipped.test(pos), bitset.test(pos));
        flipped.flip(pos);
        prop_assert_eq!(flipped, bitset);
    }

    #[test]
    fn test_string_roundtrip(bitset in arb_bitset(300)) {
        let text = bitset.to_string();
        prop_assert_eq!(text.len(), bitset.len());
        let parsed: DynamicBitset<u8> = text.parse().unwrap();
        prop_assert_eq!(parsed, bitset);
    }

    #[test]
    fn test_count_matches_bools(bitset in dense_bitset()) {
        let expected = as_bools(&bitset).into_iter().filter(|&b| b).count();
        prop_assert_eq!(bitset.count(), expected);
        prop_assert_eq!(bitset.ones().len(), expected);
        prop_assert!(bitset.check_consistency());
    }

    #[test]
    fn test_ones_match_find_next(bitset in dense_bitset()) {
        let mut scanned = Vec::new();
        let mut next = bitset.find_first();
        while let Some(pos) = next {
            scanned.push(pos);
            next = bitset.find_next(pos);
        }
        let forward: Vec<_> = bitset.ones().collect();
        let mut backward: Vec<_> = bitset.ones().rev().collect();
        backward.reverse();

        prop_assert_eq!(&scanned, &forward);
        prop_assert_eq!(&forward, &backward);
    }

    #[test]
    fn test_resize_shrink_bounds_count(bitset in dense_bitset(), keep in 0usize..256) {
        let mut shrunk = bitset.clone();
        let keep = keep.min(bitset.len());
        shrunk.resize(keep, false);
        prop_assert!(shrunk.count() <= keep);
        prop_assert_eq!(as_bools(&shrunk), as_bools(&bitset)[..keep].to_vec());
        prop_assert!(shrunk.check_consistency());
    }

    #[test]
    fn test_resize_grow_fills(bitset in arb_bitset(100), extra in 0usize..100, value in any::<bool>()) {
        let mut grown = bitset.clone();
        grown.resize(bitset.len() + extra, value);
        let mut expected = as_bools(&bitset);
        expected.extend(std::iter::repeat_n(value, extra));
        prop_assert_eq!(as_bools(&grown), expected);
        prop_assert!(grown.check_consistency());
    }

    #[test]
    fn test_range_ops_match_bitwise(
        bitset in dense_bitset(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
        value in any::<bool>(),
    ) {
        let len = bitset.len();
        let pos = a.index(len + 1);
        let count = b.index(len - pos + 1);

        let mut set = bitset.clone();
        set.set_range(pos, count, value);
        let mut flipped = bitset.clone();
        flipped.flip_range(pos, count);

        for i in 0..len {
            let inside = (pos..pos + count).contains(&i);
            prop_assert_eq!(set.test(i), if inside { value } else { bitset.test(i) });
            prop_assert_eq!(flipped.test(i), bitset.test(i) ^ inside);
        }
        prop_assert!(set.check_consistency());
        prop_assert!(flipped.check_consistency());
    }

    #[test]
    fn test_shift_laws(bitset in dense_bitset(), m in 0usize..300, n in 0usize..300) {
        prop_assert_eq!((&bitset << m) << n, &bitset << (m + n));
        prop_assert_eq!((&bitset >> m) >> n, &bitset >> (m + n));
        prop_assert!((&bitset << bitset.len()).none());
        prop_assert_eq!(&bitset << 0, bitset.clone());

        let shifted = &bitset << m;
        for i in 0..bitset.len() {
            let expected = i >= m && bitset.test(i - m);
            prop_assert_eq!(shifted.test(i), expected);
        }
        prop_assert!(shifted.check_consistency());
    }

    #[test]
    fn test_logic_ops_match_bools((a, b) in arb_pair(200)) {
        let (ab, bb) = (as_bools(&a), as_bools(&b));
        let zip = |f: fn(bool, bool) -> bool| -> Vec<bool> {
            ab.iter().zip(&bb).map(|(&x, &y)| f(x, y)).collect()
        };

        prop_assert_eq!(as_bools(&(&a & &b)), zip(|x, y| x & y));
        prop_assert_eq!(as_bools(&(&a | &b)), zip(|x, y| x | y));
        prop_assert_eq!(as_bools(&(&a ^ &b)), zip(|x, y| x ^ y));
        prop_assert_eq!(as_bools(&(&a - &b)), zip(|x, y| x & !y));
        prop_assert_eq!(as_bools(&!&a), ab.iter().map(|&x| !x).collect::<Vec<_>>());
        prop_assert!((!&a).check_consistency());
    }

    #[test]
    fn test_subset_laws((a, b) in arb_pair(200)) {
        prop_assert!(a.is_subset_of(&a));
        prop_assert!(!a.is_proper_subset_of(&a));

        if a.is_subset_of(&b) && b.is_subset_of(&a) {
            prop_assert_eq!(&a, &b);
        }
        prop_assert!((&a & &b).is_subset_of(&a));
        prop_assert!(a.is_subset_of(&(&a | &b)));
        prop_assert_eq!(a.is_proper_subset_of(&b), a.is_subset_of(&b) && a != b);
        prop_assert_eq!(a.intersects(&b), (&a & &b).any());
    }

    #[test]
    fn test_ordering_laws(a in arb_bitset(40), b in arb_bitset(40), c in arb_bitset(40)) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        if a < b && b < c {
            prop_assert!(a < c);
        }
        if !a.is_empty() {
            prop_assert!(DynamicBitset::new() < a);
        }
    }

    #[test]
    fn test_equal_size_order_is_numeric((a, b) in arb_pair(120)) {
        let value = |bitset: &DynamicBitset<u16>| -> u128 { u128::try_from(bitset).unwrap() };
        prop_assert_eq!(a.cmp(&b), value(&a).cmp(&value(&b)));
    }

    #[test]
    fn test_push_pop_roundtrip(bools in prop::collection::vec(any::<bool>(), 0..200)) {
        let mut bitset = DynamicBitset::<u32>::new();
        for &bit in &bools {
            bitset.push(bit);
        }
        prop_assert_eq!(bitset.len(), bools.len());

        let mut popped = Vec::new();
        while let Some(bit) = bitset.pop() {
            prop_assert!(bitset.check_consistency());
            popped.push(bit);
        }
        popped.reverse();
        prop_assert_eq!(popped, bools);
    }
}
