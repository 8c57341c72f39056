//! Heap walks: block iteration, usage statistics, and integrity checks.

use std::iter::FusedIterator;

use tagheap_core::{BlockInfo, BlockLayout, BlockOffset, MIN_BLOCK_SIZE, WORD_SIZE};

use crate::arena::TagArena;
use crate::error::ArenaError;

/// Address-ordered iterator over the blocks of a [`TagArena`].
///
/// Created by [`TagArena::blocks`]. Follows header sizes from offset 0
/// to the end of the arena.
pub struct Blocks<'a> {
    arena: &'a TagArena,
    next: Option<BlockOffset>,
}

impl Iterator for Blocks<'_> {
    type Item = BlockInfo;

    fn next(&mut self) -> Option<BlockInfo> {
        let header = self.next?;
        let block = self.arena.block_at(header);
        // A zero-sized tag would never advance; stop instead of spinning.
        self.next = if block.size == 0 {
            None
        } else {
            self.arena.next_header(header)
        };
        Some(block)
    }
}

impl FusedIterator for Blocks<'_> {}

/// Point-in-time usage summary of an arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Total arena size in bytes.
    pub capacity: usize,
    /// Number of blocks, free and allocated.
    pub block_count: usize,
    /// Number of free blocks.
    pub free_blocks: usize,
    /// Number of allocated blocks.
    pub allocated_blocks: usize,
    /// Bytes held by free blocks, tags included.
    pub free_bytes: usize,
    /// Bytes held by allocated blocks, tags included.
    pub allocated_bytes: usize,
    /// Size of the largest free block, or 0 if none.
    pub largest_free: usize,
}

impl ArenaStats {
    /// Fraction of free bytes outside the largest free block.
    ///
    /// 0.0 means all free space is contiguous; values near 1.0 mean it is
    /// scattered across many small blocks.
    pub fn fragmentation(&self) -> f64 {
        if self.free_bytes == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free_bytes as f64
    }
}

impl TagArena {
    /// Iterate over all blocks in address order.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            arena: self,
            next: Some(BlockOffset(0)),
        }
    }

    /// Collect the current block map.
    pub fn layout(&self) -> BlockLayout {
        self.blocks().collect()
    }

    /// Size of the largest free block, or 0 if every block is allocated.
    pub fn largest_free(&self) -> usize {
        self.blocks()
            .filter(|block| block.is_free())
            .map(|block| block.size)
            .max()
            .unwrap_or(0)
    }

    /// Summarise block counts and byte usage.
    pub fn stats(&self) -> ArenaStats {
        let mut stats = ArenaStats {
            capacity: self.capacity(),
            ..ArenaStats::default()
        };
        for block in self.blocks() {
            stats.block_count += 1;
            if block.is_free() {
                stats.free_blocks += 1;
                stats.free_bytes += block.size;
                stats.largest_free = stats.largest_free.max(block.size);
            } else {
                stats.allocated_blocks += 1;
                stats.allocated_bytes += block.size;
            }
        }
        stats
    }

    /// Verify the block invariants over the whole arena.
    ///
    /// Checks that blocks tile the arena exactly, that every header
    /// matches its footer, that no block is smaller than
    /// [`MIN_BLOCK_SIZE`], and that no two neighbouring blocks are both
    /// free. Never panics, even on arbitrary tag contents.
    pub fn check_integrity(&self) -> Result<(), ArenaError> {
        let end = self.capacity();
        let mut at = 0usize;
        let mut prev_free = false;

        while at < end {
            let corrupted = |reason: String| ArenaError::Corrupted { offset: at, reason };

            if end - at < MIN_BLOCK_SIZE {
                return Err(corrupted(format!(
                    "{} trailing bytes cannot hold a block",
                    end - at
                )));
            }
            let head = self.read_tag(at);
            let size = head.size();
            if size < MIN_BLOCK_SIZE {
                return Err(corrupted(format!(
                    "block size {size} below minimum {MIN_BLOCK_SIZE}"
                )));
            }
            if size > end - at {
                return Err(corrupted(format!(
                    "block size {size} overruns arena end {end}"
                )));
            }
            let foot = self.read_tag(at + size - WORD_SIZE);
            if foot != head {
                return Err(corrupted(format!(
                    "header {head} does not match footer {foot}"
                )));
            }
            if head.is_free() && prev_free {
                return Err(corrupted("adjacent free blocks".to_string()));
            }

            prev_free = head.is_free();
            at += size;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tagheap_core::{BlockState, Tag};

    use crate::{ArenaConfig, ArenaError, TagArena};

    use super::*;

    fn quiet(capacity: usize) -> TagArena {
        TagArena::new(ArenaConfig::new(capacity).with_diagnostics(false)).unwrap()
    }

    #[test]
    fn fresh_arena_has_one_block() {
        let arena = quiet(128);
        let layout = arena.layout();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout[0].size, 128);
        assert_eq!(layout[0].state, BlockState::Free);
    }

    #[test]
    fn stats_track_usage() {
        let mut arena = quiet(128);
        arena.allocate(20).unwrap();
        let stats = arena.stats();
        assert_eq!(
            stats,
            ArenaStats {
                capacity: 128,
                block_count: 2,
                free_blocks: 1,
                allocated_blocks: 1,
                free_bytes: 100,
                allocated_bytes: 28,
                largest_free: 100,
            }
        );
        assert_eq!(stats.fragmentation(), 0.0);
    }

    #[test]
    fn largest_free_is_zero_when_full() {
        let mut arena = quiet(28);
        arena.allocate(20).unwrap();
        assert_eq!(arena.largest_free(), 0);
        assert_eq!(arena.stats().fragmentation(), 0.0);
    }

    #[test]
    fn fragmentation_counts_scattered_free_space() {
        // [free 28][alloc 28][free 28][alloc 28]
        let mut arena = quiet(112);
        let a = arena.allocate(20).unwrap();
        arena.allocate(20).unwrap();
        let c = arena.allocate(20).unwrap();
        arena.allocate(20).unwrap();
        arena.free(a);
        arena.free(c);
        assert_eq!(arena.stats().fragmentation(), 0.5);
    }

    #[test]
    fn integrity_holds_after_mixed_operations() {
        let mut arena = quiet(256);
        let a = arena.allocate(10).unwrap();
        let b = arena.allocate(30).unwrap();
        let c = arena.allocate(50).unwrap();
        arena.free(b);
        assert!(arena.check_integrity().is_ok());
        arena.free(a);
        arena.free(c);
        assert!(arena.check_integrity().is_ok());
    }

    #[test]
    fn integrity_detects_footer_mismatch() {
        let mut arena = quiet(128);
        arena.write_tag(124, Tag::new(64, BlockState::Free));
        assert!(matches!(
            arena.check_integrity(),
            Err(ArenaError::Corrupted { offset: 0, .. })
        ));
    }

    #[test]
    fn integrity_detects_adjacent_free_blocks() {
        let mut arena = quiet(128);
        arena.write_block(BlockOffset(0), 64, BlockState::Free);
        arena.write_block(BlockOffset(64), 64, BlockState::Free);
        assert!(matches!(
            arena.check_integrity(),
            Err(ArenaError::Corrupted { offset: 64, .. })
        ));
    }

    #[test]
    fn integrity_detects_overrun_and_zero_size() {
        let mut arena = quiet(128);
        arena.write_tag(0, Tag::new(256, BlockState::Free));
        assert!(arena.check_integrity().is_err());

        arena.write_tag(0, Tag::from_raw(0));
        assert!(arena.check_integrity().is_err());
    }

    #[test]
    fn blocks_stops_on_zero_tag() {
        let mut arena = quiet(128);
        arena.write_tag(0, Tag::from_raw(0));
        assert_eq!(arena.blocks().count(), 1);
    }
}
