//! tagheap: a fixed-capacity boundary-tag allocator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the tagheap sub-crates. For most users, adding `tagheap` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tagheap::prelude::*;
//!
//! let mut arena = TagArena::new(ArenaConfig::new(128)).unwrap();
//!
//! // 20 payload bytes + two 4-byte tags, split off the front of the arena.
//! let ptr = arena.allocate(20).unwrap();
//! assert_eq!(arena.stats().allocated_bytes, 28);
//! assert_eq!(arena.stats().free_bytes, 100);
//!
//! // Freeing merges the block back into its free neighbour.
//! arena.free(ptr);
//! assert_eq!(arena.stats().block_count, 1);
//! assert_eq!(arena.stats().largest_free, 128);
//!
//! arena.teardown();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `tagheap-arena` | `TagArena`, config, errors, heap walks, locked wrapper |
//! | [`types`] | `tagheap-core` | Tag encoding, offsets, block descriptors, `BlockAllocator` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The allocator itself (`tagheap-arena`).
///
/// [`arena::TagArena`] owns the arena; [`arena::LockedArena`] shares one
/// across threads.
pub use tagheap_arena as arena;

/// Tag encoding, offsets, and the allocator trait (`tagheap-core`).
pub use tagheap_core as types;

/// Common imports for typical tagheap usage.
///
/// ```rust
/// use tagheap::prelude::*;
/// ```
pub mod prelude {
    pub use tagheap_arena::{ArenaConfig, ArenaError, ArenaStats, LockedArena, SharedArena, TagArena};
    pub use tagheap_core::{
        BlockAllocator, BlockInfo, BlockOffset, BlockState, PayloadPtr, MIN_BLOCK_SIZE, WORD_SIZE,
    };
}
