//! Block navigation: pure offset arithmetic over boundary tags.
//!
//! None of these functions decide anything about allocation state; they
//! only translate between a block's header, its footer, and its
//! neighbours using the size stored in the tags.

use tagheap_core::{BlockInfo, BlockOffset, WORD_SIZE};

use crate::arena::TagArena;

impl TagArena {
    /// Header offset of the block whose footer sits at `footer`.
    ///
    /// Computed as `footer - size + WORD_SIZE`.
    pub fn header_from_footer(&self, footer: BlockOffset) -> BlockOffset {
        let size = self.read_tag(footer.0).size();
        BlockOffset(footer.0 + WORD_SIZE - size)
    }

    /// Footer offset of the block whose header sits at `header`.
    ///
    /// Computed as `header + size - WORD_SIZE`.
    pub fn footer_from_header(&self, header: BlockOffset) -> BlockOffset {
        let size = self.read_tag(header.0).size();
        BlockOffset(header.0 + size - WORD_SIZE)
    }

    /// Header of the block immediately after `header`.
    ///
    /// Returns `None` once the arena's end boundary is reached.
    pub fn next_header(&self, header: BlockOffset) -> Option<BlockOffset> {
        let next = header.0 + self.read_tag(header.0).size();
        if next >= self.capacity() {
            return None;
        }
        Some(BlockOffset(next))
    }

    /// Footer of the block immediately before `header`.
    ///
    /// Returns `None` for the first block in the arena.
    pub fn prev_footer(&self, header: BlockOffset) -> Option<BlockOffset> {
        if header.0 == 0 {
            return None;
        }
        Some(BlockOffset(header.0 - WORD_SIZE))
    }

    /// Decode the block whose header sits at `header`.
    pub fn block_at(&self, header: BlockOffset) -> BlockInfo {
        let tag = self.read_tag(header.0);
        BlockInfo {
            offset: header,
            size: tag.size(),
            state: tag.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tagheap_core::BlockState;

    use crate::{ArenaConfig, TagArena};

    use super::*;

    fn split_arena() -> TagArena {
        // [alloc 28][free 100]
        let mut arena = TagArena::new(ArenaConfig::new(128).with_diagnostics(false)).unwrap();
        arena.allocate(20).unwrap();
        arena
    }

    #[test]
    fn footer_and_header_are_inverse() {
        let arena = split_arena();
        let footer = arena.footer_from_header(BlockOffset(0));
        assert_eq!(footer, BlockOffset(24));
        assert_eq!(arena.header_from_footer(footer), BlockOffset(0));

        let footer = arena.footer_from_header(BlockOffset(28));
        assert_eq!(footer, BlockOffset(124));
        assert_eq!(arena.header_from_footer(footer), BlockOffset(28));
    }

    #[test]
    fn next_header_walks_to_end() {
        let arena = split_arena();
        assert_eq!(arena.next_header(BlockOffset(0)), Some(BlockOffset(28)));
        assert_eq!(arena.next_header(BlockOffset(28)), None);
    }

    #[test]
    fn single_block_has_no_neighbours() {
        let arena = TagArena::with_capacity(64).unwrap();
        assert_eq!(arena.next_header(BlockOffset(0)), None);
        assert_eq!(arena.prev_footer(BlockOffset(0)), None);
    }

    #[test]
    fn prev_footer_is_one_word_back() {
        let arena = split_arena();
        assert_eq!(arena.prev_footer(BlockOffset(28)), Some(BlockOffset(24)));
    }

    #[test]
    fn block_at_decodes_state() {
        let arena = split_arena();
        let first = arena.block_at(BlockOffset(0));
        assert_eq!(first.size, 28);
        assert_eq!(first.state, BlockState::Allocated);
        let second = arena.block_at(BlockOffset(28));
        assert_eq!(second.size, 100);
        assert_eq!(second.state, BlockState::Free);
    }
}
