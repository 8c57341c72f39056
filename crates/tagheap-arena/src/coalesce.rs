//! Freeing blocks and merging them with free neighbours.
//!
//! A freed block looks at most one block to each side. The left
//! neighbour is found through its footer (the word right before our
//! header) and the right neighbour through our own size, so both merges
//! are O(1):
//!
//! ```text
//! before:  [ free L ][ freed B ][ free R ]
//! back:    [ free L+B           ][ free R ]
//! forward: [ free L+B+R                   ]
//! ```
//!
//! Tags left inside a merged block are stale and never read again.

use tagheap_core::{BlockOffset, BlockState, PayloadPtr, WORD_SIZE};

use crate::arena::TagArena;
use crate::error::ArenaError;

impl TagArena {
    /// Return a block to the arena and merge it with free neighbours.
    ///
    /// `ptr` must have been returned by [`allocate`](Self::allocate) on
    /// this arena and not freed since. That is not checked: a foreign or
    /// stale pointer leaves the tags in an unspecified state and may
    /// panic on an out-of-bounds access. Use [`try_free`](Self::try_free)
    /// for a validated variant.
    ///
    /// Cost is O(1).
    pub fn free(&mut self, ptr: PayloadPtr) {
        let mut header = ptr.header();
        self.set_state(header, BlockState::Free);

        if let Some(left_footer) = self.prev_footer(header) {
            if self.read_tag(left_footer.0).is_free() {
                header = self.back_coalesce(header, left_footer);
            }
        }

        if let Some(right) = self.next_header(header) {
            if self.read_tag(right.0).is_free() {
                self.forward_coalesce(header, right);
            }
        }
    }

    /// Validated [`free`](Self::free).
    ///
    /// Walks the arena to confirm `ptr` is the payload of a currently
    /// allocated block before freeing it. This turns double frees and
    /// foreign pointers into [`ArenaError::InvalidPointer`] at the price
    /// of an O(number of blocks) scan.
    pub fn try_free(&mut self, ptr: PayloadPtr) -> Result<(), ArenaError> {
        let invalid = |reason| ArenaError::InvalidPointer {
            offset: ptr.0,
            reason,
        };

        if ptr.0 < WORD_SIZE || ptr.0 >= self.capacity() {
            return Err(invalid("outside the arena"));
        }
        let header = BlockOffset(ptr.0 - WORD_SIZE);
        let block = self
            .blocks()
            .take_while(|block| block.offset <= header)
            .find(|block| block.offset == header)
            .ok_or_else(|| invalid("not at a block boundary"))?;
        if block.is_free() {
            return Err(invalid("block is already free"));
        }

        self.free(ptr);
        Ok(())
    }

    /// Merge the block at `header` into the free block ending at `left_footer`.
    ///
    /// Returns the header of the merged block.
    fn back_coalesce(&mut self, header: BlockOffset, left_footer: BlockOffset) -> BlockOffset {
        let current = self.read_tag(header.0).size();
        let left = self.read_tag(left_footer.0).size();
        let left_header = self.header_from_footer(left_footer);
        self.write_block(left_header, left + current, BlockState::Free);
        left_header
    }

    /// Merge the free block at `right` into the block at `header`.
    fn forward_coalesce(&mut self, header: BlockOffset, right: BlockOffset) {
        let current = self.read_tag(header.0).size();
        let right_size = self.read_tag(right.0).size();
        self.write_block(header, current + right_size, BlockState::Free);
    }
}

#[cfg(test)]
mod tests {
    use tagheap_core::{BlockState, PayloadPtr};

    use crate::{ArenaConfig, ArenaError, TagArena};

    fn quiet(capacity: usize) -> TagArena {
        TagArena::new(ArenaConfig::new(capacity).with_diagnostics(false)).unwrap()
    }

    fn sizes(arena: &TagArena) -> Vec<(usize, BlockState)> {
        arena.blocks().map(|b| (b.size, b.state)).collect()
    }

    /// Four 28-byte allocations filling a 112-byte arena, and their pointers.
    fn four_blocks() -> (TagArena, [PayloadPtr; 4]) {
        let mut arena = quiet(112);
        let ptrs = [
            arena.allocate(20).unwrap(),
            arena.allocate(20).unwrap(),
            arena.allocate(20).unwrap(),
            arena.allocate(20).unwrap(),
        ];
        (arena, ptrs)
    }

    #[test]
    fn free_restores_fresh_arena() {
        let mut arena = quiet(128);
        let ptr = arena.allocate(20).unwrap();
        arena.free(ptr);
        assert_eq!(sizes(&arena), vec![(128, BlockState::Free)]);
        assert_eq!(arena.read_tag(124).raw(), 128);
    }

    #[test]
    fn free_between_allocated_neighbours_does_not_merge() {
        let (mut arena, [_, b, _, _]) = four_blocks();
        arena.free(b);
        assert_eq!(
            sizes(&arena),
            vec![
                (28, BlockState::Allocated),
                (28, BlockState::Free),
                (28, BlockState::Allocated),
                (28, BlockState::Allocated),
            ]
        );
    }

    #[test]
    fn back_coalesce_merges_left() {
        let (mut arena, [_, b, c, _]) = four_blocks();
        arena.free(b);
        arena.free(c);
        assert_eq!(
            sizes(&arena),
            vec![
                (28, BlockState::Allocated),
                (56, BlockState::Free),
                (28, BlockState::Allocated),
            ]
        );
        // Merged footer sits where c's footer was.
        assert_eq!(arena.read_tag(80).raw(), 56);
    }

    #[test]
    fn forward_coalesce_merges_right() {
        let (mut arena, [_, b, c, _]) = four_blocks();
        arena.free(c);
        arena.free(b);
        assert_eq!(
            sizes(&arena),
            vec![
                (28, BlockState::Allocated),
                (56, BlockState::Free),
                (28, BlockState::Allocated),
            ]
        );
    }

    #[test]
    fn free_merges_both_sides() {
        let (mut arena, [a, b, c, _]) = four_blocks();
        arena.free(a);
        arena.free(c);
        arena.free(b);
        assert_eq!(
            sizes(&arena),
            vec![(84, BlockState::Free), (28, BlockState::Allocated)]
        );
        assert_eq!(arena.read_tag(0).raw(), 84);
        assert_eq!(arena.read_tag(80).raw(), 84);
    }

    #[test]
    fn freeing_last_block_merges_into_first() {
        let (mut arena, [a, b, c, d]) = four_blocks();
        arena.free(a);
        arena.free(b);
        arena.free(c);
        arena.free(d);
        assert_eq!(sizes(&arena), vec![(112, BlockState::Free)]);
    }

    #[test]
    fn try_free_accepts_live_pointer() {
        let (mut arena, [_, b, _, _]) = four_blocks();
        assert!(arena.try_free(b).is_ok());
        assert!(arena.check_integrity().is_ok());
    }

    #[test]
    fn try_free_rejects_double_free() {
        let (mut arena, [_, b, _, _]) = four_blocks();
        arena.free(b);
        assert!(matches!(
            arena.try_free(b),
            Err(ArenaError::InvalidPointer {
                reason: "block is already free",
                ..
            })
        ));
    }

    #[test]
    fn try_free_rejects_interior_pointer() {
        let (mut arena, [a, _, _, _]) = four_blocks();
        let inside = PayloadPtr(a.0 + 8);
        assert!(matches!(
            arena.try_free(inside),
            Err(ArenaError::InvalidPointer {
                reason: "not at a block boundary",
                ..
            })
        ));
        assert!(arena.check_integrity().is_ok());
    }

    #[test]
    fn try_free_rejects_out_of_bounds() {
        let (mut arena, _) = four_blocks();
        assert!(arena.try_free(PayloadPtr(0)).is_err());
        assert!(arena.try_free(PayloadPtr(4096)).is_err());
    }
}
