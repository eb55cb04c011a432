//! Precondition errors for sparse bit set operations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bit index at or beyond the set's capacity.
    #[error("index out of range: {index} >= capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// A binary operation between sets of different capacity.
    #[error("capacity mismatch: {left} != {right}")]
    CapacityMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
