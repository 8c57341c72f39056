//! Strongly-typed arena offsets.
//!
//! The allocator never hands out raw pointers. Block headers and payloads
//! are addressed by byte offset from the start of the arena, wrapped in
//! distinct newtypes so a header offset can't be passed where a payload
//! pointer is expected.

use std::fmt;

use crate::tag::WORD_SIZE;

/// Byte offset of a block's header word within the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockOffset(pub usize);

impl BlockOffset {
    /// The payload pointer for the block whose header sits here.
    pub fn payload(self) -> PayloadPtr {
        PayloadPtr(self.0 + WORD_SIZE)
    }
}

impl fmt::Display for BlockOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for BlockOffset {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Offset of the first payload byte of an allocated block.
///
/// This is what [`BlockAllocator::allocate`](crate::BlockAllocator::allocate)
/// returns and what `free` takes back. It always sits exactly one word
/// past the block's header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayloadPtr(pub usize);

impl PayloadPtr {
    /// Header offset of the block this payload belongs to.
    ///
    /// Saturates at zero for offsets smaller than one word; such a value
    /// was never produced by an allocator.
    pub fn header(self) -> BlockOffset {
        BlockOffset(self.0.saturating_sub(WORD_SIZE))
    }
}

impl fmt::Display for PayloadPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for PayloadPtr {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
