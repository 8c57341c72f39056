//! Arena configuration parameters.

use tagheap_core::MIN_BLOCK_SIZE;

use crate::error::ArenaError;

/// Configuration for a [`TagArena`](crate::TagArena).
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Total size of the arena in bytes, tags included.
    ///
    /// Default: 65_536. Must be at least [`MIN_BLOCK_SIZE`] and at most
    /// [`ArenaConfig::MAX_CAPACITY`], since block sizes are stored in
    /// signed 32-bit tags.
    pub capacity: usize,

    /// Print a line to stderr when an allocation request cannot be served.
    ///
    /// Default: `true`. The error value is returned either way.
    pub diagnostics: bool,
}

impl ArenaConfig {
    /// Default arena capacity: 64KB.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Largest capacity a tag can describe.
    pub const MAX_CAPACITY: usize = i32::MAX as usize;

    /// Create a config for an arena of `capacity` bytes.
    ///
    /// Diagnostics are enabled.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            diagnostics: true,
        }
    }

    /// Enable or disable exhaustion diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Check that the capacity can be represented by the arena's tags.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity < MIN_BLOCK_SIZE {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "capacity must be >= {MIN_BLOCK_SIZE} bytes (got {})",
                    self.capacity,
                ),
            });
        }
        if self.capacity > Self::MAX_CAPACITY {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "capacity must be <= {} bytes (got {})",
                    Self::MAX_CAPACITY,
                    self.capacity,
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_64kb() {
        let config = ArenaConfig::default();
        assert_eq!(config.capacity, 64 * 1024);
        assert!(config.diagnostics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn capacity_below_two_words_rejected() {
        let config = ArenaConfig::new(MIN_BLOCK_SIZE - 1);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn capacity_of_exactly_two_words_accepted() {
        assert!(ArenaConfig::new(MIN_BLOCK_SIZE).validate().is_ok());
    }

    #[test]
    fn capacity_above_tag_range_rejected() {
        let config = ArenaConfig::new(ArenaConfig::MAX_CAPACITY + 1);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn with_diagnostics_toggles() {
        let config = ArenaConfig::new(128).with_diagnostics(false);
        assert!(!config.diagnostics);
        assert_eq!(config.capacity, 128);
    }
}
