//! Bounded FIFO buffer holding a unit's recent inputs.
//!
//! # Example
//!
//! ```
//! use phasegate_core::window::RollingWindow;
//!
//! let mut window: RollingWindow<f64> = RollingWindow::new(3).unwrap();
//! window.push(4.0);
//! window.push(6.0);
//! window.push(8.0);
//! window.push(2.0); // evicts 4.0
//!
//! assert_eq!(window.to_vec(), vec![6.0, 8.0, 2.0]);
//! ```

use std::collections::VecDeque;

use crate::error::{GateError, GateResult};

/// A fixed-capacity window that drops its oldest item when a new one
/// arrives at capacity.
///
/// Items are ordered oldest to newest; index 0 is the oldest.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create an empty window holding at most `capacity` items.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidConfiguration` if `capacity` is 0.
    pub fn new(capacity: usize) -> GateResult<Self> {
        if capacity == 0 {
            return Err(GateError::zero_capacity());
        }
        Ok(Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Add an item, evicting the oldest first when the window is full.
    pub fn push(&mut self, item: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(item);
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Check if the window holds exactly `capacity` items.
    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// Maximum number of items the window retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Most recently added item.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }

    /// Oldest item.
    pub fn first(&self) -> Option<&T> {
        self.buffer.front()
    }

    /// Get an item by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buffer.get(index)
    }
}

impl<T: Clone> RollingWindow<T> {
    /// Copy the contents out, oldest to newest.
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.iter().cloned().collect()
    }
}

impl RollingWindow<f64> {
    /// Positional dot product of `weights` against the window contents.
    ///
    /// `weights[0]` multiplies the oldest value. Returns `None` unless the
    /// window is full and `weights.len()` equals the capacity.
    pub fn weighted_sum(&self, weights: &[f64]) -> Option<f64> {
        if !self.is_full() || weights.len() != self.capacity {
            return None;
        }
        Some(
            self.buffer
                .iter()
                .zip(weights.iter())
                .map(|(value, weight)| value * weight)
                .sum(),
        )
    }

    /// Arithmetic mean of the current contents, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.buffer.is_empty() {
            return None;
        }
        let sum: f64 = self.buffer.iter().sum();
        Some(sum / self.buffer.len() as f64)
    }
}
