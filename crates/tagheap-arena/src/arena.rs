//! Arena ownership, lifecycle, and raw tag access.
//!
//! [`TagArena`] is the top-level allocator type. It owns a `Vec<u8>` of
//! exactly `capacity` bytes for its whole life. The buffer is reserved
//! once in [`TagArena::new`] and never grows; all later operations mutate
//! tags inside it in place.
//!
//! Allocation lives in [`fit`](crate::fit), freeing in
//! [`coalesce`](crate::coalesce), and block arithmetic in
//! [`navigate`](crate::navigate). This module only provides the
//! primitives those build on.

use tagheap_core::{BlockAllocator, BlockOffset, BlockState, PayloadPtr, Tag, MIN_BLOCK_SIZE, WORD_SIZE};

use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// A fixed-capacity, boundary-tag, best-fit allocator.
///
/// # Layout
///
/// Right after construction the arena is one free block:
///
/// ```text
/// offset 0                                        capacity
/// ┌──────────┬─────────────────────────────┬──────────┐
/// │ +capacity│            free             │ +capacity│
/// └──────────┴─────────────────────────────┴──────────┘
/// ```
///
/// Blocks always tile the buffer exactly, no two adjacent blocks are
/// both free, and every block is at least [`MIN_BLOCK_SIZE`] bytes.
///
/// `TagArena` has no interior synchronisation. Mutating operations take
/// `&mut self`; wrap it in a [`LockedArena`](crate::LockedArena) to share
/// one arena across threads.
#[derive(Debug)]
pub struct TagArena {
    /// Backing storage. Its length is the arena's end boundary.
    mem: Vec<u8>,
    /// Whether exhaustion is reported on stderr.
    diagnostics: bool,
}

impl TagArena {
    /// Acquire an arena of `config.capacity` bytes.
    ///
    /// The buffer is reserved with `try_reserve_exact`, so an allocation
    /// failure comes back as [`ArenaError::AcquisitionFailed`] instead of
    /// aborting the process. Callers with no fallback should treat it as
    /// fatal.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;

        let mut mem = Vec::new();
        mem.try_reserve_exact(config.capacity)
            .map_err(|_| ArenaError::AcquisitionFailed {
                capacity: config.capacity,
            })?;
        mem.resize(config.capacity, 0);

        let mut arena = Self {
            mem,
            diagnostics: config.diagnostics,
        };
        arena.write_block(BlockOffset(0), config.capacity, BlockState::Free);
        Ok(arena)
    }

    /// Acquire an arena of `capacity` bytes with default settings.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(capacity))
    }

    /// Release the arena.
    ///
    /// Consumes `self`, so the buffer is released exactly once and the
    /// arena can't be used afterwards. Dropping the arena has the same
    /// effect; this just makes the end of its lifetime explicit.
    pub fn teardown(self) {
        drop(self);
    }

    /// Total arena size in bytes.
    pub fn capacity(&self) -> usize {
        self.mem.len()
    }

    /// Whether exhaustion diagnostics are printed.
    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    /// Usable payload bytes of an allocated block.
    ///
    /// The slice covers everything between the header and the footer, so
    /// it may be longer than the size originally requested when the block
    /// was not split.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` does not lie inside the arena. A pointer that is in
    /// bounds but was never returned by [`allocate`](Self::allocate) yields
    /// an arbitrary slice.
    pub fn payload(&self, ptr: PayloadPtr) -> &[u8] {
        let len = self.payload_len(ptr);
        &self.mem[ptr.0..ptr.0 + len]
    }

    /// Mutable access to an allocated block's payload.
    ///
    /// Writes never reach the block's footer.
    ///
    /// # Panics
    ///
    /// Same as [`payload`](Self::payload).
    pub fn payload_mut(&mut self, ptr: PayloadPtr) -> &mut [u8] {
        let len = self.payload_len(ptr);
        &mut self.mem[ptr.0..ptr.0 + len]
    }

    fn payload_len(&self, ptr: PayloadPtr) -> usize {
        self.read_tag(ptr.header().0)
            .size()
            .saturating_sub(MIN_BLOCK_SIZE)
    }

    /// Read the tag word at byte offset `at`.
    pub(crate) fn read_tag(&self, at: usize) -> Tag {
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(&self.mem[at..at + WORD_SIZE]);
        Tag::from_le_bytes(word)
    }

    /// Write a tag word at byte offset `at`.
    pub(crate) fn write_tag(&mut self, at: usize, tag: Tag) {
        self.mem[at..at + WORD_SIZE].copy_from_slice(&tag.to_le_bytes());
    }

    /// Stamp matching header and footer tags for a block of `size` bytes.
    pub(crate) fn write_block(&mut self, header: BlockOffset, size: usize, state: BlockState) {
        let tag = Tag::new(size, state);
        self.write_tag(header.0, tag);
        self.write_tag(header.0 + size - WORD_SIZE, tag);
    }

    /// Flip a block's header and footer to `state`, keeping its size.
    pub(crate) fn set_state(&mut self, header: BlockOffset, state: BlockState) {
        let size = self.read_tag(header.0).size();
        self.write_block(header, size, state);
    }
}

impl BlockAllocator for TagArena {
    type Error = ArenaError;

    fn allocate(&mut self, size: usize) -> Result<PayloadPtr, ArenaError> {
        TagArena::allocate(self, size)
    }

    fn free(&mut self, ptr: PayloadPtr) {
        TagArena::free(self, ptr)
    }

    fn capacity(&self) -> usize {
        TagArena::capacity(self)
    }
}
