//! Core allocator abstraction.

use crate::id::PayloadPtr;

/// An allocator handing out payload offsets from a fixed arena.
///
/// Implemented by `TagArena` and its locked wrapper. Workload drivers and
/// benchmarks are written against this trait so they can run any
/// allocator in the workspace.
pub trait BlockAllocator {
    /// Error returned when a request cannot be served.
    type Error: std::error::Error;

    /// Allocate a block with at least `size` usable payload bytes.
    ///
    /// `size` must be greater than zero.
    fn allocate(&mut self, size: usize) -> Result<PayloadPtr, Self::Error>;

    /// Return a block to the allocator.
    ///
    /// `ptr` must have come from [`allocate`](Self::allocate) on the same
    /// allocator and must not have been freed since.
    fn free(&mut self, ptr: PayloadPtr);

    /// Total arena capacity in bytes.
    fn capacity(&self) -> usize;
}
