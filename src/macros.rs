/// Splits a bit position into `(block index, bit index within the block)`.
macro_rules! bitpos {
    ($block:ty, $idx:expr) => {{
        let idx = $idx;
        (
            $crate::storage::block_index::<$block>(idx),
            $crate::storage::bit_index::<$block>(idx),
        )
    }};
}

/// Emits a `trace`-level event when the `tracing` feature is enabled.
macro_rules! trace_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    }};
}

/// Emits a `debug`-level event when the `tracing` feature is enabled.
macro_rules! debug_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

/// Asserts the size and tail invariants in debug builds.
macro_rules! debug_assert_consistent {
    ($bitset:expr) => {
        debug_assert!(
            $bitset.check_consistency(),
            "bitset invariants violated: {} bits in {} blocks",
            $bitset.len(),
            $bitset.num_blocks()
        )
    };
}

pub(crate) use bitpos;
pub(crate) use debug_assert_consistent;
pub(crate) use debug_event;
pub(crate) use trace_event;
