//! Phase-gated windowed-average unit.
//!
//! A [`GatedUnit`] keeps the last `capacity` inputs it has seen and, when
//! asked, reduces them to a single weighted sum. Whether it is *asked* is
//! decided by the caller through [`GatedUnit::is_gated_open`], a literal
//! comparison between the unit's phase label and the current global phase.
//!
//! # Example
//!
//! ```
//! use phasegate_core::unit::{GatedUnit, UnitId};
//!
//! let mut unit = GatedUnit::new(UnitId(0), 3, 1).unwrap();
//! for value in [4.0, 6.0, 8.0, 2.0] {
//!     unit.ingest(value);
//! }
//!
//! assert!(unit.is_gated_open(1));
//! let output = unit.compute();
//! assert!((output - 16.0 / 3.0).abs() < 1e-12);
//! assert_eq!(unit.last_output(), output);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::UnitConfig;
use crate::error::{GateError, GateResult};
use crate::window::RollingWindow;

/// Tolerance used when checking whether custom weights form an average.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Opaque unit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit with a bounded input history, fixed weights and a phase label.
#[derive(Debug, Clone, PartialEq)]
pub struct GatedUnit {
    id: UnitId,
    phase: i64,
    weights: Vec<f64>,
    history: RollingWindow<f64>,
    last_output: f64,
}

impl GatedUnit {
    /// Create a unit with uniform weights `1/capacity`, i.e. a plain moving
    /// average of the last `capacity` inputs.
    ///
    /// # Errors
    ///
    /// `GateError::InvalidConfiguration` if `capacity` is 0.
    pub fn new(id: UnitId, capacity: usize, phase: i64) -> GateResult<Self> {
        if capacity == 0 {
            return Err(GateError::zero_capacity());
        }
        let weights = vec![1.0 / capacity as f64; capacity];
        Self::with_weights(id, phase, weights)
    }

    /// Create a unit with custom weights. The capacity is `weights.len()`.
    ///
    /// Weights are applied positionally: `weights[0]` multiplies the oldest
    /// retained input. They are not required to sum to 1; a sum other than 1
    /// is accepted and logged at `warn` level.
    ///
    /// # Errors
    ///
    /// `GateError::InvalidConfiguration` if `weights` is empty or contains a
    /// non-finite value.
    pub fn with_weights(id: UnitId, phase: i64, weights: Vec<f64>) -> GateResult<Self> {
        if let Some(bad) = weights.iter().find(|w| !w.is_finite()) {
            return Err(GateError::invalid(format!(
                "unit {} has a non-finite weight: {}",
                id, bad
            )));
        }
        let history = RollingWindow::new(weights.len())?;

        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            tracing::warn!(
                unit = %id,
                weight_sum = sum,
                "Weights do not sum to 1; output is a weighted sum, not an average"
            );
        }

        Ok(Self {
            id,
            phase,
            weights,
            history,
            last_output: 0.0,
        })
    }

    /// Build a unit from a [`UnitConfig`], using its custom weights when set.
    ///
    /// # Errors
    ///
    /// `GateError::InvalidConfiguration` if the capacity is 0 or the
    /// configured weights do not match it.
    pub fn from_config(id: UnitId, phase: i64, config: &UnitConfig) -> GateResult<Self> {
        match &config.weights {
            Some(weights) => {
                if weights.len() != config.capacity {
                    return Err(GateError::weight_length(config.capacity, weights.len()));
                }
                Self::with_weights(id, phase, weights.clone())
            }
            None => Self::new(id, config.capacity, phase),
        }
    }

    /// Append `value` to the history, evicting the oldest value when full.
    ///
    /// Never touches `last_output`.
    pub fn ingest(&mut self, value: f64) {
        self.history.push(value);
    }

    /// True iff `global_phase` equals this unit's phase label.
    ///
    /// No modular reduction is applied; the caller supplies a phase already
    /// in the unit's label space.
    #[inline]
    pub fn is_gated_open(&self, global_phase: i64) -> bool {
        global_phase == self.phase
    }

    /// Weighted sum of the full window.
    ///
    /// Returns `0.0` while the window holds fewer than `capacity` values; in
    /// that case `last_output` keeps its previous value.
    pub fn compute(&mut self) -> f64 {
        match self.history.weighted_sum(&self.weights) {
            Some(output) => {
                self.last_output = output;
                output
            }
            None => 0.0,
        }
    }

    /// Clear the history and zero `last_output`.
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_output = 0.0;
    }

    /// True once the window holds `capacity` values.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.history.is_full()
    }

    /// Identifier assigned at construction.
    #[inline]
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Phase label compared against the global phase by the gate.
    #[inline]
    pub fn phase(&self) -> i64 {
        self.phase
    }

    /// Window size `N`; `compute` yields a value only once `N` inputs are held.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Per-position weights, oldest-first, one per window slot.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Current history, oldest to newest.
    pub fn history(&self) -> Vec<f64> {
        self.history.to_vec()
    }

    /// Most recent computed value; `0.0` until the first full-window compute.
    #[inline]
    pub fn last_output(&self) -> f64 {
        self.last_output
    }

    /// Serializable copy of the unit's state.
    pub fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            phase: self.phase,
            capacity: self.capacity(),
            history: self.history(),
            last_output: self.last_output,
        }
    }
}

impl fmt::Display for GatedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unit {} [phase {}] output={:.2}",
            self.id, self.phase, self.last_output
        )
    }
}

/// Point-in-time view of a unit, for display and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub phase: i64,
    pub capacity: usize,
    pub history: Vec<f64>,
    pub last_output: f64,
}
