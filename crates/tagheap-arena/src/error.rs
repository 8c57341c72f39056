//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The backing buffer could not be obtained from the system.
    AcquisitionFailed {
        /// Number of bytes requested for the arena.
        capacity: usize,
    },
    /// The arena configuration is out of range.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// No free block is large enough for the request.
    ///
    /// The arena is left exactly as it was before the call.
    Exhausted {
        /// Payload bytes requested.
        requested: usize,
        /// Size of the largest free block at the time, tags included.
        largest_free: usize,
    },
    /// A pointer passed to `try_free` does not name a live allocation.
    InvalidPointer {
        /// The offending payload offset.
        offset: usize,
        /// Why the pointer was rejected.
        reason: &'static str,
    },
    /// A heap walk found tags that break the block invariants.
    Corrupted {
        /// Offset of the header where the walk stopped.
        offset: usize,
        /// Which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AcquisitionFailed { capacity } => {
                write!(f, "could not get {capacity} bytes from the system")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
            Self::Exhausted {
                requested,
                largest_free,
            } => {
                write!(
                    f,
                    "cannot service request of size {requested} (largest free block {largest_free} bytes)"
                )
            }
            Self::InvalidPointer { offset, reason } => {
                write!(f, "invalid pointer {offset:#x}: {reason}")
            }
            Self::Corrupted { offset, reason } => {
                write!(f, "arena corrupted at offset {offset}: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_names_requested_size() {
        let err = ArenaError::Exhausted {
            requested: 200,
            largest_free: 100,
        };
        assert!(err.to_string().contains("cannot service request of size 200"));
    }

    #[test]
    fn acquisition_failure_names_capacity() {
        let err = ArenaError::AcquisitionFailed { capacity: 4096 };
        assert_eq!(err.to_string(), "could not get 4096 bytes from the system");
    }
}
