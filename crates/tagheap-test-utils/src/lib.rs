//! Test fixtures and workload drivers for tagheap development.
//!
//! Provides a [`LayoutBuilder`] for carving an arena into an exact block
//! map, and a seeded [`Workload`] that drives any
//! [`BlockAllocator`](tagheap_core::BlockAllocator) through random
//! allocate/free sequences.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod workload;

pub use fixtures::{quiet_arena, LayoutBuilder};
pub use workload::{Step, Workload, WorkloadConfig, WorkloadStats};
