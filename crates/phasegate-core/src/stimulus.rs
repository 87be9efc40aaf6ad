//! Seeded synthetic input streams.
//!
//! Produces uniformly distributed integers in `[low, high)` from a
//! `ChaCha8Rng`, so a given seed always yields the same stream on every
//! platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// Settings for the synthetic input stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StimulusConfig {
    /// RNG seed.
    pub seed: u64,

    /// Number of values, i.e. the number of simulation steps.
    pub length: usize,

    /// Inclusive lower bound.
    pub low: i64,

    /// Exclusive upper bound.
    pub high: i64,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            length: 15,
            low: 1,
            high: 10,
        }
    }
}

impl StimulusConfig {
    pub fn validate(&self) -> GateResult<()> {
        if self.length == 0 {
            return Err(GateError::invalid("stimulus.length must be > 0"));
        }
        if self.low >= self.high {
            return Err(GateError::invalid(format!(
                "stimulus.low must be < stimulus.high, got [{}, {})",
                self.low, self.high
            )));
        }
        Ok(())
    }

    /// Draw the input stream.
    ///
    /// # Errors
    ///
    /// Propagates [`StimulusConfig::validate`] failures.
    pub fn generate(&self) -> GateResult<Vec<f64>> {
        self.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let stream = (0..self.length)
            .map(|_| rng.gen_range(self.low..self.high) as f64)
            .collect();
        tracing::debug!(
            seed = self.seed,
            length = self.length,
            "Generated stimulus stream"
        );
        Ok(stream)
    }
}
