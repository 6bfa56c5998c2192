//! Error kinds shared by the map configuration and the ranged algebra.

use thiserror::Error;

/// Failures of a bulk mutation request.
///
/// Every variant is raised before the backing store is touched, so a failed
/// call never leaves a partially compacted sequence behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The requested window violates `start <= end <= len`.
    #[error("index range {start}..{end} out of bounds for length {len}")]
    IndexRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// A structural mutation was requested on a fixed-length store.
    #[error("unsupported operation on fixed-length view: {operation}")]
    Unsupported { operation: &'static str },
}

/// Rejected `MapConfig` values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("initial bucket count must be non-zero")]
    ZeroBuckets,

    #[error("max load factor must be finite and in (0, 8], got {0}")]
    LoadFactor(f32),
}
