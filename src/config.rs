//! Sizing policy for `ChainedHashMap`.

use crate::error::ConfigError;

/// Bucket-array sizing for a chained table.
///
/// The bucket count is always a power of two so a bucket index is a mask of
/// the stored hash. The table doubles its bucket array once
/// `len > buckets * max_load_factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    initial_buckets: usize,
    max_load_factor: f32,
}

impl MapConfig {
    pub const DEFAULT_BUCKETS: usize = 16;
    pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;
    const MAX_LOAD_FACTOR: f32 = 8.0;

    /// Validate and build a config. `initial_buckets` is rounded up to the
    /// next power of two.
    pub fn new(initial_buckets: usize, max_load_factor: f32) -> Result<Self, ConfigError> {
        if initial_buckets == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        if !max_load_factor.is_finite()
            || max_load_factor <= 0.0
            || max_load_factor > Self::MAX_LOAD_FACTOR
        {
            return Err(ConfigError::LoadFactor(max_load_factor));
        }
        Ok(Self {
            initial_buckets: initial_buckets.next_power_of_two(),
            max_load_factor,
        })
    }

    /// Default load factor with enough buckets to hold `capacity` entries
    /// without a rehash.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            initial_buckets: buckets_for(capacity, Self::DEFAULT_LOAD_FACTOR)
                .max(Self::DEFAULT_BUCKETS),
            max_load_factor: Self::DEFAULT_LOAD_FACTOR,
        }
    }

    pub fn initial_buckets(&self) -> usize {
        self.initial_buckets
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_buckets: Self::DEFAULT_BUCKETS,
            max_load_factor: Self::DEFAULT_LOAD_FACTOR,
        }
    }
}

/// Smallest power-of-two bucket count that keeps `len` entries within the
/// load factor.
pub(crate) fn buckets_for(len: usize, max_load_factor: f32) -> usize {
    let needed = (len as f64 / f64::from(max_load_factor)).ceil() as usize;
    needed.max(1).next_power_of_two()
}
