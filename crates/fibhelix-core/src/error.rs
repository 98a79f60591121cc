//! Error types for fibhelix-core.

use thiserror::Error;

/// Result type for fibhelix-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building a manifold.
///
/// A running manifold never fails; everything here is caught at construction.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration violates an invariant the engine relies on.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A configuration value that the engine cannot run with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A count that must be at least one was zero.
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },

    /// A distance, threshold or frequency that must be strictly positive.
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// A scale factor that must be a finite number.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// A probability outside `[0, 1]`.
    #[error("{field} must be a probability in [0, 1], got {value}")]
    NotProbability { field: &'static str, value: f64 },

    /// The Fibonacci table would overflow a `u64`.
    #[error("fib_count {actual} exceeds supported maximum {max}")]
    FibTableTooLarge { max: usize, actual: usize },

    /// The starting Fibonacci index does not exist in the table.
    #[error("initial_fib_index {index} out of range for table of {count}")]
    InitialFibIndexOutOfRange { index: usize, count: usize },
}
