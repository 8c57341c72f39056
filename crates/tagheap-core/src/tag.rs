//! Sign-magnitude boundary tags.
//!
//! Every block in an arena starts with a header word and ends with a
//! footer word. Both hold the same [`Tag`]: the magnitude is the block's
//! total size in bytes (tags included) and the sign carries the block's
//! [`BlockState`]. Positive means free, negative means allocated.
//!
//! ```text
//!   ┌────────┬──────────────────────────────┬────────┐
//!   │ header │           payload            │ footer │
//!   │  ±size │                              │  ±size │
//!   └────────┴──────────────────────────────┴────────┘
//!    WORD_SIZE                               WORD_SIZE
//! ```

use std::fmt;

/// Size of one tag word in bytes.
///
/// Tags are stored as little-endian `i32`, so this is also the unit of
/// per-block bookkeeping overhead: every block pays `2 * WORD_SIZE`.
pub const WORD_SIZE: usize = std::mem::size_of::<i32>();

/// Smallest size a block can ever have: a header and a footer.
pub const MIN_BLOCK_SIZE: usize = 2 * WORD_SIZE;

/// Allocation state of a block, decoded from the sign of its tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockState {
    /// Available for allocation. Stored as a positive tag.
    Free,
    /// Handed out to a caller. Stored as a negative tag.
    Allocated,
}

impl BlockState {
    /// The opposite state.
    pub fn flipped(self) -> Self {
        match self {
            Self::Free => Self::Allocated,
            Self::Allocated => Self::Free,
        }
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("free"),
            Self::Allocated => f.write_str("allocated"),
        }
    }
}

/// One header or footer word as stored in the arena.
///
/// A `Tag` is a thin wrapper over the raw `i32`. Use [`Tag::new`] to
/// encode a size and state, and [`Tag::size`] / [`Tag::state`] to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tag(i32);

impl Tag {
    /// Encode a block size and state.
    ///
    /// `size` must fit in a positive `i32`. Arenas reject capacities
    /// larger than `i32::MAX` at construction, so every block size an
    /// arena produces satisfies this.
    pub fn new(size: usize, state: BlockState) -> Self {
        debug_assert!(size <= i32::MAX as usize, "block size {size} overflows a tag");
        let magnitude = size as i32;
        match state {
            BlockState::Free => Self(magnitude),
            BlockState::Allocated => Self(-magnitude),
        }
    }

    /// Wrap a raw tag value read from the arena.
    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw signed value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Block size in bytes, including both tag words.
    pub fn size(self) -> usize {
        self.0.unsigned_abs() as usize
    }

    /// Decoded allocation state. A zero tag never appears in a healthy
    /// arena; it decodes as allocated so it is never handed out.
    pub fn state(self) -> BlockState {
        if self.0 > 0 {
            BlockState::Free
        } else {
            BlockState::Allocated
        }
    }

    /// Whether the tag marks a free block.
    pub fn is_free(self) -> bool {
        self.0 > 0
    }

    /// Same size, opposite state.
    pub fn flipped(self) -> Self {
        Self(self.0.wrapping_neg())
    }

    /// Little-endian byte encoding for storage in the arena.
    pub fn to_le_bytes(self) -> [u8; WORD_SIZE] {
        self.0.to_le_bytes()
    }

    /// Decode from little-endian bytes read out of the arena.
    pub fn from_le_bytes(bytes: [u8; WORD_SIZE]) -> Self {
        Self(i32::from_le_bytes(bytes))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}
