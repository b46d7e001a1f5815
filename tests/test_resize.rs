use dyn_bitset::DynamicBitset;

#[test]
fn test_resize_grow_with_ones() {
    let mut bitset = DynamicBitset::<u8>::with_value(5, 0b00101);
    bitset.resize(20, true);

    assert_eq!(bitset.len(), 20);
    assert_eq!(bitset.num_blocks(), 3);
    assert_eq!(bitset.to_string(), "11111111111111100101");
    assert!(bitset.check_consistency());
}

#[test]
fn test_resize_grow_with_zeros() {
    let mut bitset = DynamicBitset::<u16>::filled(10, true);
    bitset.resize(40, false);

    assert_eq!(bitset.count(), 10);
    assert_eq!(bitset.find_next(9), None);
}

#[test]
fn test_resize_shrink_clears_tail() {
    let mut bitset = DynamicBitset::<u8>::filled(24, true);
    bitset.resize(11, false);

    assert_eq!(bitset.len(), 11);
    assert_eq!(bitset.num_blocks(), 2);
    assert_eq!(bitset.as_blocks(), &[0xFF, 0x07]);
    assert_eq!(bitset.count(), 11);
}

#[test]
fn test_shrink_never_exceeds_new_size() {
    for bits in [0usize, 1, 7, 8, 9, 63, 64, 65, 100] {
        let mut bitset = DynamicBitset::<u64>::with_value(130, 0);
        for pos in 0..130 {
            bitset.set(pos, true);
        }
        bitset.resize(bits, false);
        assert!(bitset.count() <= bits, "{bits}");
        assert_eq!(bitset.count(), bits);
        assert!(bitset.check_consistency());
    }
}

#[test]
fn test_resize_to_zero_and_back() {
    let mut bitset = DynamicBitset::<u32>::filled(50, true);
    bitset.resize(0, true);
    assert!(bitset.is_empty());
    assert_eq!(bitset.num_blocks(), 0);

    bitset.resize(3, false);
    assert_eq!(bitset.to_string(), "000");
}

#[test]
fn test_resize_same_size_is_noop() {
    let mut bitset = DynamicBitset::<u8>::with_value(6, 0b101010);
    bitset.resize(6, true);
    assert_eq!(bitset.to_string(), "101010");
}

#[test]
fn test_reserve_keeps_size() {
    let mut bitset = DynamicBitset::<u64>::with_value(10, 0x3FF);
    bitset.reserve(1000);
    assert!(bitset.capacity() >= 1000);
    assert_eq!(bitset.len(), 10);
    assert_eq!(bitset.count(), 10);

    bitset.shrink_to_fit();
    assert!(bitset.capacity() < 1000);
    assert_eq!(bitset.count(), 10);
}

#[test]
fn test_pop_until_empty() {
    let mut bitset: DynamicBitset<u8> = "1100110011".parse().unwrap();
    let mut popped = Vec::new();
    while let Some(bit) = bitset.pop() {
        popped.push(bit);
        assert!(bitset.check_consistency());
    }
    assert_eq!(
        popped,
        vec![true, true, false, false, true, true, false, false, true, true]
    );
    assert!(bitset.is_empty());
    assert_eq!(bitset.pop(), None);
}

#[test]
fn test_with_capacity_push() {
    let mut bitset = DynamicBitset::<u16>::with_capacity(48);
    let capacity = bitset.capacity();
    for i in 0..48 {
        bitset.push(i >= 40);
    }
    assert_eq!(bitset.capacity(), capacity);
    assert_eq!(bitset.num_blocks(), 3);
    assert_eq!(bitset.count(), 8);
}
