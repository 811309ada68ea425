// THEORY:
// The `error` module defines the single failure surface of the crate. The
// comparator core performs no I/O, so there is no transient-failure class:
// every error here is a precondition violation on caller-supplied inputs.
// The policy is fail fast — an operation is rejected before any partial
// traversal occurs, so a caller never receives a truncated or padded
// aggregate dressed up as a real result.

use thiserror::Error;

/// Result type for pixel_delta operations.
pub type Result<T> = std::result::Result<T, CompareError>;

/// Error type for pixel_delta operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompareError {
    /// The two buffers do not share the same pixel dimensions. Every
    /// comparison requires width and height to match exactly.
    #[error("pixel dimensions do not match: {width_a}x{height_a} vs {width_b}x{height_b}")]
    DimensionMismatch {
        width_a: u32,
        height_a: u32,
        width_b: u32,
        height_b: u32,
    },
    /// A buffer's byte length disagrees with its declared dimensions
    /// (length must equal width * height * 4 for RGBA8 data).
    #[error("buffer is {actual} bytes but the declared dimensions require {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    /// A worker task in a parallel pass did not complete.
    #[error("a comparison worker task did not complete")]
    WorkerFailed,
}
