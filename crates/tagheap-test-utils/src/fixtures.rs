//! Arena fixtures with a known block layout.

use tagheap_arena::{ArenaConfig, ArenaError, TagArena};
use tagheap_core::{BlockState, PayloadPtr, MIN_BLOCK_SIZE};

/// An arena of `capacity` bytes with diagnostics turned off.
///
/// # Panics
///
/// Panics if the capacity is invalid.
pub fn quiet_arena(capacity: usize) -> TagArena {
    TagArena::new(ArenaConfig::new(capacity).with_diagnostics(false))
        .expect("fixture capacity must be valid")
}

/// Builds an arena whose blocks have exact sizes and states.
///
/// Segments are laid out in order from offset 0 and the arena capacity is
/// their sum. Free segments next to each other merge, as they would in
/// any arena, so separate them with an allocated guard when distinct free
/// blocks are wanted.
///
/// ```
/// use tagheap_test_utils::LayoutBuilder;
///
/// let (arena, live) = LayoutBuilder::new()
///     .free(64)
///     .allocated(16)
///     .free(128)
///     .allocated(16)
///     .build()
///     .unwrap();
/// assert_eq!(arena.capacity(), 224);
/// assert_eq!(live.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayoutBuilder {
    segments: Vec<(usize, BlockState)>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a free block of `size` bytes, tags included.
    pub fn free(mut self, size: usize) -> Self {
        self.segments.push((size, BlockState::Free));
        self
    }

    /// Append an allocated block of `size` bytes, tags included.
    pub fn allocated(mut self, size: usize) -> Self {
        self.segments.push((size, BlockState::Allocated));
        self
    }

    /// Total bytes the arena will need.
    pub fn capacity(&self) -> usize {
        self.segments.iter().map(|(size, _)| size).sum()
    }

    /// Build the arena.
    ///
    /// Every segment is first allocated in order (each request carves the
    /// lowest-offset tail of the single free block), then the free
    /// segments are released. Returns the arena and the payload pointers
    /// of the allocated segments in address order.
    ///
    /// Segments must be larger than [`MIN_BLOCK_SIZE`] so each one can be
    /// requested with a non-zero payload.
    pub fn build(self) -> Result<(TagArena, Vec<PayloadPtr>), ArenaError> {
        if let Some(&(size, _)) = self.segments.iter().find(|(size, _)| *size <= MIN_BLOCK_SIZE) {
            return Err(ArenaError::InvalidConfig {
                reason: format!("segment size {size} must exceed {MIN_BLOCK_SIZE}"),
            });
        }
        // Every tail left behind is larger than MIN_BLOCK_SIZE, so each
        // request splits and the final one takes the exact remainder.
        let mut arena = TagArena::new(ArenaConfig::new(self.capacity()).with_diagnostics(false))?;

        let mut carved = Vec::with_capacity(self.segments.len());
        for &(size, state) in &self.segments {
            let ptr = arena.allocate(size - MIN_BLOCK_SIZE)?;
            carved.push((ptr, state));
        }

        let mut live = Vec::new();
        for (ptr, state) in carved {
            match state {
                BlockState::Free => arena.free(ptr),
                BlockState::Allocated => live.push(ptr),
            }
        }
        Ok((arena, live))
    }
}
