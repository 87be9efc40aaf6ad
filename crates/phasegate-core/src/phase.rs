//! Repeating global phase sequence.
//!
//! The global phase for 1-based step `k` is `labels[(k - 1) % len]`. Labels
//! are arbitrary integers; they are not required to be distinct, sorted or
//! contiguous.

use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// A finite, non-empty cycle of phase labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct PhaseCycle {
    labels: Vec<i64>,
}

impl PhaseCycle {
    /// Build a cycle from explicit labels.
    ///
    /// # Errors
    ///
    /// `GateError::InvalidConfiguration` if `labels` is empty.
    pub fn new(labels: Vec<i64>) -> GateResult<Self> {
        if labels.is_empty() {
            return Err(GateError::invalid("phase cycle must not be empty"));
        }
        Ok(Self { labels })
    }

    /// The cycle `0, 1, ..., n - 1`.
    ///
    /// # Errors
    ///
    /// `GateError::InvalidConfiguration` if `n` is 0.
    pub fn sequential(n: usize) -> GateResult<Self> {
        Self::new((0..n as i64).collect())
    }

    /// Global phase for a 1-based step number.
    ///
    /// Step 0 wraps to the last label.
    pub fn phase_for_step(&self, step: usize) -> i64 {
        let len = self.labels.len();
        self.labels[(step % len + len - 1) % len]
    }

    /// Number of labels in one period.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false: a cycle cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The labels in cycle order.
    ///
    /// # Returns
    ///
    /// Slice whose element `i` is the global phase of steps `i + 1`,
    /// `i + 1 + len`, and so on.
    pub fn labels(&self) -> &[i64] {
        &self.labels
    }
}

impl TryFrom<Vec<i64>> for PhaseCycle {
    type Error = GateError;

    fn try_from(labels: Vec<i64>) -> GateResult<Self> {
        Self::new(labels)
    }
}

impl From<PhaseCycle> for Vec<i64> {
    fn from(cycle: PhaseCycle) -> Self {
        cycle.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cycle_rejected() {
        assert!(PhaseCycle::new(vec![]).is_err());
        assert!(PhaseCycle::sequential(0).is_err());
    }

    #[test]
    fn test_sequential_cycle() {
        let cycle = PhaseCycle::sequential(3).unwrap();
        assert_eq!(cycle.labels(), &[0, 1, 2]);
        assert_eq!(cycle.len(), 3);
        assert!(!cycle.is_empty());
    }

    #[test]
    fn test_phase_for_step_wraps() {
        let cycle = PhaseCycle::sequential(3).unwrap();
        let phases: Vec<i64> = (1..=7).map(|s| cycle.phase_for_step(s)).collect();
        assert_eq!(phases, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_arbitrary_labels() {
        let cycle = PhaseCycle::new(vec![0, 1, 0, 1]).unwrap();
        assert_eq!(cycle.phase_for_step(1), 0);
        assert_eq!(cycle.phase_for_step(2), 1);
        assert_eq!(cycle.phase_for_step(4), 1);
        assert_eq!(cycle.phase_for_step(5), 0);

        let odd = PhaseCycle::new(vec![7, -3]).unwrap();
        assert_eq!(odd.phase_for_step(2), -3);
    }

    #[test]
    fn test_step_zero_wraps_to_last() {
        let cycle = PhaseCycle::new(vec![4, 5, 6]).unwrap();
        assert_eq!(cycle.phase_for_step(0), 6);
    }

    #[test]
    fn test_large_step_does_not_overflow() {
        let cycle = PhaseCycle::sequential(3).unwrap();
        assert_eq!(cycle.phase_for_step(usize::MAX), cycle.phase_for_step(usize::MAX % 3));
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let ok: PhaseCycle = serde_json::from_str("[0, 2]").unwrap();
        assert_eq!(ok.labels(), &[0, 2]);
        assert!(serde_json::from_str::<PhaseCycle>("[]").is_err());
    }
}
