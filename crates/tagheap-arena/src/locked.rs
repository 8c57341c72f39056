//! Mutex-guarded arena for cross-thread sharing.
//!
//! [`TagArena`] itself is single-threaded. [`LockedArena`] serialises
//! every operation behind one `Mutex` around the whole arena, and
//! [`SharedArena`] is the `Arc` handle handed to worker threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tagheap_core::{BlockAllocator, PayloadPtr};

use crate::arena::TagArena;
use crate::error::ArenaError;
use crate::walk::ArenaStats;

/// Shared handle for an arena used from several threads.
pub type SharedArena = Arc<LockedArena>;

/// A [`TagArena`] behind a single exclusive lock.
#[derive(Debug)]
pub struct LockedArena {
    inner: Mutex<TagArena>,
}

impl LockedArena {
    /// Wrap an arena.
    pub fn new(arena: TagArena) -> Self {
        Self {
            inner: Mutex::new(arena),
        }
    }

    /// Lock the arena for a sequence of operations.
    ///
    /// A poisoned lock is recovered. Arena operations on valid inputs
    /// never panic midway through a tag update.
    pub fn lock(&self) -> MutexGuard<'_, TagArena> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate under the lock. See [`TagArena::allocate`].
    pub fn allocate(&self, size: usize) -> Result<PayloadPtr, ArenaError> {
        self.lock().allocate(size)
    }

    /// Free under the lock. See [`TagArena::free`].
    pub fn free(&self, ptr: PayloadPtr) {
        self.lock().free(ptr);
    }

    /// Validated free under the lock. See [`TagArena::try_free`].
    pub fn try_free(&self, ptr: PayloadPtr) -> Result<(), ArenaError> {
        self.lock().try_free(ptr)
    }

    /// Usage summary under the lock.
    pub fn stats(&self) -> ArenaStats {
        self.lock().stats()
    }

    /// Wrap this arena in an `Arc` for sharing.
    pub fn into_shared(self) -> SharedArena {
        Arc::new(self)
    }

    /// Take the arena back out of the lock.
    pub fn into_inner(self) -> TagArena {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<TagArena> for LockedArena {
    fn from(arena: TagArena) -> Self {
        Self::new(arena)
    }
}

impl BlockAllocator for LockedArena {
    type Error = ArenaError;

    fn allocate(&mut self, size: usize) -> Result<PayloadPtr, ArenaError> {
        LockedArena::allocate(self, size)
    }

    fn free(&mut self, ptr: PayloadPtr) {
        LockedArena::free(self, ptr)
    }

    fn capacity(&self) -> usize {
        self.lock().capacity()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::ArenaConfig;

    fn shared(capacity: usize) -> SharedArena {
        let arena = TagArena::new(ArenaConfig::new(capacity).with_diagnostics(false)).unwrap();
        LockedArena::new(arena).into_shared()
    }

    #[test]
    fn allocate_and_free_through_lock() {
        let arena = shared(128);
        let ptr = arena.allocate(20).unwrap();
        assert_eq!(arena.stats().allocated_bytes, 28);
        arena.free(ptr);
        assert_eq!(arena.stats().largest_free, 128);
    }

    #[test]
    fn threads_share_one_arena() {
        let arena = shared(64 * 1024);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let arena = Arc::clone(&arena);
                thread::spawn(move || {
                    for i in 0..100 {
                        let ptr = arena.allocate(8 + (t * 7 + i) % 40).unwrap();
                        arena.lock().payload_mut(ptr).fill(t as u8);
                        arena.free(ptr);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let arena = Arc::try_unwrap(arena).unwrap().into_inner();
        assert!(arena.check_integrity().is_ok());
        assert_eq!(arena.stats().block_count, 1);
    }

    #[test]
    fn try_free_through_lock() {
        let arena = shared(128);
        let ptr = arena.allocate(20).unwrap();
        assert!(arena.try_free(ptr).is_ok());
        assert!(arena.try_free(ptr).is_err());
    }

    #[test]
    fn trait_capacity_reads_inner() {
        let arena = LockedArena::from(TagArena::with_capacity(256).unwrap());
        assert_eq!(BlockAllocator::capacity(&arena), 256);
    }
}
