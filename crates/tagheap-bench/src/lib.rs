//! Benchmark profiles and utilities for the tagheap allocator.
//!
//! Provides pre-built workload profiles and arena fixtures for benchmarks
//! and examples:
//!
//! - [`small_objects`]: many tiny requests, allocation-heavy
//! - [`mixed_sizes`]: sizes spread over two orders of magnitude
//! - [`churn`]: balanced allocate/free to stress coalescing
//! - [`fragmented_arena`]: an arena with many small free holes, the worst
//!   case for the best-fit scan

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tagheap_arena::{ArenaError, TagArena};
use tagheap_core::PayloadPtr;
use tagheap_test_utils::{LayoutBuilder, WorkloadConfig};

/// Default arena size for profiles: 1MB.
pub const PROFILE_CAPACITY: usize = 1 << 20;

/// Requests of 1–32 bytes with a 70% allocation bias.
pub fn small_objects(seed: u64) -> WorkloadConfig {
    WorkloadConfig::new(seed).sizes(1, 32).alloc_bias(0.7)
}

/// Requests of 8–2048 bytes with a 60% allocation bias.
pub fn mixed_sizes(seed: u64) -> WorkloadConfig {
    WorkloadConfig::new(seed).sizes(8, 2048).alloc_bias(0.6)
}

/// Requests of 16–256 bytes with an even allocate/free split.
pub fn churn(seed: u64) -> WorkloadConfig {
    WorkloadConfig::new(seed).sizes(16, 256).alloc_bias(0.5)
}

/// Build an arena of `holes` free 32-byte blocks separated by allocated
/// 16-byte guards, followed by one large free tail of `tail` bytes.
///
/// Every allocation that does not fit a hole must scan past all of them.
/// Returns the arena and the guard pointers.
pub fn fragmented_arena(holes: usize, tail: usize) -> Result<(TagArena, Vec<PayloadPtr>), ArenaError> {
    let mut builder = LayoutBuilder::new();
    for _ in 0..holes {
        builder = builder.free(32).allocated(16);
    }
    builder.free(tail).build()
}
