//! Boundary-tag, best-fit allocator over a single fixed-capacity arena.
//!
//! [`TagArena`] owns one contiguous byte buffer and carves it into blocks.
//! Each block carries a header and a footer tag holding its size, with the
//! sign marking whether it is free or allocated. Allocation scans every
//! block for the tightest fit and splits off the remainder when there is
//! room; freeing merges the block with free neighbours on both sides.
//!
//! # Architecture
//!
//! ```text
//! TagArena
//! ├── arena    : buffer acquisition, teardown, tag reads/writes
//! ├── navigate : header/footer translation, next-block lookup
//! ├── fit      : best-fit search and split (allocate)
//! ├── coalesce : free with back/forward merging (free, try_free)
//! └── walk     : block iteration, stats, integrity checks
//! LockedArena  : Mutex<TagArena> for callers that share across threads
//! ```
//!
//! # Example
//!
//! ```
//! use tagheap_arena::TagArena;
//!
//! let mut arena = TagArena::with_capacity(128).unwrap();
//! let ptr = arena.allocate(20).unwrap();
//! arena.payload_mut(ptr).fill(0xAB);
//! arena.free(ptr);
//! assert_eq!(arena.stats().largest_free, 128);
//! arena.teardown();
//! ```
//!
//! # Safety
//!
//! Everything here is safe Rust. Addresses are byte offsets into the
//! owned buffer and every tag access is a bounds-checked slice access.
//! Freeing a pointer the arena never handed out cannot cause memory
//! unsafety, but it can leave the block tags inconsistent; use
//! [`TagArena::try_free`] when pointers come from untrusted code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod fit;
pub mod locked;
pub mod navigate;
pub mod walk;

pub use arena::TagArena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use locked::{LockedArena, SharedArena};
pub use walk::{ArenaStats, Blocks};
