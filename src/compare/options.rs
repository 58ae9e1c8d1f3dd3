//! Comparison options.

use crate::error::{Error, Result};

/// Default tolerance between the two datasets, in file units.
pub const DEFAULT_BUFFER_DISTANCE: f64 = 10.0;

/// Options for buffered comparison.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Buffer distance applied to the buffered side(s)
    pub buffer_distance: f64,

    /// Whether to compute buffers and intersection tests with rayon
    pub parallel: bool,
}

impl CompareOptions {
    /// Create new compare options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set buffer distance.
    pub fn with_buffer_distance(mut self, distance: f64) -> Self {
        self.buffer_distance = distance;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the buffer distance is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.buffer_distance.is_finite() || self.buffer_distance < 0.0 {
            return Err(Error::InvalidBufferDistance(self.buffer_distance));
        }
        Ok(())
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            buffer_distance: DEFAULT_BUFFER_DISTANCE,
            parallel: false,
        }
    }
}

/// Which side is kept and which side is buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Keep reference records whose buffer misses every buffered candidate
    #[default]
    NonOverlapping,
    /// Keep test records that miss every buffered base record
    Unique,
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::NonOverlapping => f.write_str("non-overlapping"),
            FilterMode::Unique => f.write_str("unique"),
        }
    }
}
