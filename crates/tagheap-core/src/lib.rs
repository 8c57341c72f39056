//! Core types and traits for the tagheap allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the on-arena tag encoding, strongly-typed offsets, block descriptors,
//! and the [`BlockAllocator`] trait used throughout the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod id;
pub mod tag;
pub mod traits;

pub use block::{BlockInfo, BlockLayout};
pub use id::{BlockOffset, PayloadPtr};
pub use tag::{BlockState, Tag, MIN_BLOCK_SIZE, WORD_SIZE};
pub use traits::BlockAllocator;
