//! Phasegate error types.
//!
//! Step-time operations on a constructed unit never fail: an insufficient
//! window and a closed gate are ordinary return values. Errors only arise
//! while building units, drivers and configuration, or when a replay target
//! falls outside the input stream.

use thiserror::Error;

/// Errors that can occur while configuring or driving a simulation.
#[derive(Debug, Error)]
pub enum GateError {
    /// Construction-time misuse: zero capacity, mismatched weights, empty
    /// phase cycle, and similar.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Replay target outside `1..=available`.
    #[error("Step {requested} out of range: the input stream has {available} steps")]
    StepOutOfRange {
        /// Requested 1-based step.
        requested: usize,
        /// Number of steps the input stream provides.
        available: usize,
    },

    /// Configuration source could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for phasegate operations.
pub type GateResult<T> = Result<T, GateError>;

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        GateError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for GateError {
    fn from(err: config::ConfigError) -> Self {
        GateError::ConfigError(err.to_string())
    }
}

impl GateError {
    /// A unit was asked to hold zero values.
    pub fn zero_capacity() -> Self {
        GateError::InvalidConfiguration("capacity must be > 0".to_string())
    }

    /// A weight vector does not match the window capacity.
    pub fn weight_length(expected: usize, actual: usize) -> Self {
        GateError::InvalidConfiguration(format!(
            "weights length must equal capacity: expected {}, got {}",
            expected, actual
        ))
    }

    /// Create an invalid configuration error from any message.
    pub fn invalid(reason: impl Into<String>) -> Self {
        GateError::InvalidConfiguration(reason.into())
    }

    /// Check if this error was caused by the supplied configuration rather
    /// than by I/O or a bad runtime request.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            GateError::InvalidConfiguration(_) | GateError::ConfigError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_display() {
        let msg = GateError::zero_capacity().to_string();
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("capacity must be > 0"));
    }

    #[test]
    fn test_weight_length_display() {
        let msg = GateError::weight_length(5, 3).to_string();
        assert!(msg.contains("expected 5"));
        assert!(msg.contains("got 3"));
    }

    #[test]
    fn test_step_out_of_range_display() {
        let err = GateError::StepOutOfRange {
            requested: 20,
            available: 15,
        };
        let msg = err.to_string();
        assert!(msg.contains("20"));
        assert!(msg.contains("15"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("invalid json").unwrap_err();
        let err: GateError = json_err.into();
        assert!(matches!(err, GateError::SerializationError(_)));
    }

    #[test]
    fn test_is_configuration_error() {
        assert!(GateError::zero_capacity().is_configuration_error());
        assert!(GateError::ConfigError("missing file".into()).is_configuration_error());
        assert!(!GateError::StepOutOfRange {
            requested: 0,
            available: 3
        }
        .is_configuration_error());
        assert!(!GateError::SerializationError("x".into()).is_configuration_error());
    }
}
