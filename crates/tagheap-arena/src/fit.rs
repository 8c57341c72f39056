//! Best-fit search and block splitting.
//!
//! Allocation is a single linear pass over every block. A free block is
//! a candidate when it can hold the payload plus its own two tags; the
//! smallest candidate wins, with ties going to the lowest offset. The
//! winner is split only when the leftover can form a block of its own:
//!
//! ```text
//! eligible:  size_of(block) >= request + 2 * WORD_SIZE
//! split:     size_of(block) >= request + 4 * WORD_SIZE
//! ```
//!
//! Blocks that are eligible but too small to split are handed out whole,
//! and the excess becomes internal fragmentation.

use tagheap_core::{BlockOffset, BlockState, PayloadPtr, MIN_BLOCK_SIZE};

use crate::arena::TagArena;
use crate::error::ArenaError;

impl TagArena {
    /// Allocate a block with at least `size` usable payload bytes.
    ///
    /// Returns the offset of the first payload byte. On failure the arena
    /// is left untouched, [`ArenaError::Exhausted`] is returned, and a
    /// diagnostic naming the request is printed if the arena was built
    /// with diagnostics enabled.
    ///
    /// `size` must be greater than zero. This is not checked; a zero-byte
    /// request hands out a block with no payload.
    ///
    /// Cost is O(number of blocks).
    pub fn allocate(&mut self, size: usize) -> Result<PayloadPtr, ArenaError> {
        let Some(needed) = size.checked_add(MIN_BLOCK_SIZE) else {
            return Err(self.exhausted(size));
        };
        let Some(header) = self.best_fit(needed) else {
            return Err(self.exhausted(size));
        };

        let orig = self.read_tag(header.0).size();
        if orig - needed >= MIN_BLOCK_SIZE {
            self.write_block(header, needed, BlockState::Allocated);
            self.write_block(
                BlockOffset(header.0 + needed),
                orig - needed,
                BlockState::Free,
            );
        } else {
            self.set_state(header, BlockState::Allocated);
        }

        Ok(header.payload())
    }

    /// Smallest free block of at least `needed` bytes, lowest offset first.
    pub(crate) fn best_fit(&self, needed: usize) -> Option<BlockOffset> {
        let mut best: Option<(BlockOffset, usize)> = None;
        let mut cursor = Some(BlockOffset(0));

        while let Some(header) = cursor {
            let tag = self.read_tag(header.0);
            if tag.is_free() && tag.size() >= needed {
                // Strict `<` keeps the earliest block on ties.
                if best.is_none_or(|(_, best_size)| tag.size() < best_size) {
                    best = Some((header, tag.size()));
                }
            }
            cursor = self.next_header(header);
        }

        best.map(|(header, _)| header)
    }

    fn exhausted(&self, size: usize) -> ArenaError {
        if self.diagnostics() {
            eprintln!("tagheap: cannot service request of size {size}");
        }
        ArenaError::Exhausted {
            requested: size,
            largest_free: self.largest_free(),
        }
    }
}
