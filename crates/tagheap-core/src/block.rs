//! Decoded block descriptors produced by heap walks.

use smallvec::SmallVec;

use crate::id::{BlockOffset, PayloadPtr};
use crate::tag::{BlockState, MIN_BLOCK_SIZE};

/// A snapshot of one block's header as seen during a heap walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// Offset of the header word.
    pub offset: BlockOffset,
    /// Total size in bytes, including header and footer.
    pub size: usize,
    /// Whether the block is free or allocated.
    pub state: BlockState,
}

impl BlockInfo {
    /// Whether this block is free.
    pub fn is_free(&self) -> bool {
        self.state == BlockState::Free
    }

    /// Usable payload bytes between the header and the footer.
    pub fn payload_len(&self) -> usize {
        self.size.saturating_sub(MIN_BLOCK_SIZE)
    }

    /// Payload pointer for this block.
    pub fn payload(&self) -> PayloadPtr {
        self.offset.payload()
    }

    /// Offset one past the footer, i.e. where the next block's header sits.
    pub fn end(&self) -> usize {
        self.offset.0 + self.size
    }
}

/// Address-ordered list of blocks covering an arena.
///
/// Small arenas rarely hold more than a handful of blocks, so the first
/// eight live inline.
pub type BlockLayout = SmallVec<[BlockInfo; 8]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_len_excludes_tags() {
        let info = BlockInfo {
            offset: BlockOffset(0),
            size: 28,
            state: BlockState::Allocated,
        };
        assert_eq!(info.payload_len(), 20);
        assert_eq!(info.payload(), PayloadPtr(4));
        assert_eq!(info.end(), 28);
        assert!(!info.is_free());
    }
}
