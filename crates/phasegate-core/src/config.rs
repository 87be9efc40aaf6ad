//! Simulation configuration.
//!
//! Configuration is layered, later sources overriding earlier ones:
//! 1. Built-in defaults (3 units, window of 5, cycle `[0, 1, 2]`, 15 steps,
//!    seed 42)
//! 2. An optional TOML file
//! 3. Environment variables with the `PHASEGATE__` prefix, e.g.
//!    `PHASEGATE__UNITS__CAPACITY=4` or `PHASEGATE__STIMULUS__SEED=7`
//!
//! # Example
//!
//! ```
//! use phasegate_core::config::SimulationConfig;
//!
//! let config = SimulationConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.effective_cycle().unwrap().labels(), &[0, 1, 2]);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};
use crate::phase::PhaseCycle;
use crate::stimulus::StimulusConfig;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PHASEGATE";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Top-level simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Explicit phase cycle. When unset the cycle is `0..units.count`.
    pub phase_cycle: Option<Vec<i64>>,

    /// Unit population settings.
    pub units: UnitConfig,

    /// Input stream settings.
    pub stimulus: StimulusConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Settings shared by every unit in the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Number of units. Unit `i` gets id `i` and phase label `i`.
    pub count: usize,

    /// Window capacity of each unit.
    pub capacity: usize,

    /// Custom weights, oldest-first. Must have `capacity` entries. Not
    /// required to sum to 1.
    pub weights: Option<Vec<f64>>,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            count: 3,
            capacity: 5,
            weights: None,
        }
    }
}

impl UnitConfig {
    pub fn validate(&self) -> GateResult<()> {
        if self.count == 0 {
            return Err(GateError::invalid("units.count must be > 0"));
        }
        if self.capacity == 0 {
            return Err(GateError::zero_capacity());
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.capacity {
                return Err(GateError::weight_length(self.capacity, weights.len()));
            }
            if weights.iter().any(|w| !w.is_finite()) {
                return Err(GateError::invalid("units.weights must all be finite"));
            }
        }
        Ok(())
    }
}

/// Logging settings, used when no `-v` flag or `RUST_LOG` is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> GateResult<()> {
        if !LOG_LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(GateError::invalid(format!(
                "logging.level must be one of {:?}, got {:?}",
                LOG_LEVELS, self.level
            )));
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Load configuration from defaults, an optional TOML file, and
    /// `PHASEGATE__*` environment variables, then validate it.
    ///
    /// # Errors
    ///
    /// `GateError::ConfigError` if a source cannot be read or parsed,
    /// `GateError::InvalidConfiguration` if the merged result is invalid.
    pub fn load(path: Option<&Path>) -> GateResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: SimulationConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file directly, without environment overrides.
    pub fn from_file(path: &Path) -> GateResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GateError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: SimulationConfig = toml::from_str(&content)
            .map_err(|e| GateError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> GateResult<String> {
        toml::to_string_pretty(self).map_err(|e| GateError::SerializationError(e.to_string()))
    }

    /// Validate every section.
    pub fn validate(&self) -> GateResult<()> {
        self.units.validate()?;
        if let Some(labels) = &self.phase_cycle {
            if labels.is_empty() {
                return Err(GateError::invalid("phase_cycle must not be empty"));
            }
        }
        self.stimulus.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// The configured cycle, or `0..units.count` when none is set.
    pub fn effective_cycle(&self) -> GateResult<PhaseCycle> {
        match &self.phase_cycle {
            Some(labels) => PhaseCycle::new(labels.clone()),
            None => PhaseCycle::sequential(self.units.count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.units.count, 3);
        assert_eq!(config.units.capacity, 5);
        assert_eq!(config.stimulus.length, 15);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unit_config_validation() {
        let zero_count = UnitConfig {
            count: 0,
            ..Default::default()
        };
        assert!(zero_count.validate().is_err());

        let zero_capacity = UnitConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(zero_capacity.validate().is_err());

        let short_weights = UnitConfig {
            capacity: 3,
            weights: Some(vec![1.0]),
            ..Default::default()
        };
        assert!(short_weights.validate().is_err());

        let unnormalized = UnitConfig {
            capacity: 2,
            weights: Some(vec![3.0, 4.0]),
            ..Default::default()
        };
        assert!(unnormalized.validate().is_ok());
    }

    #[test]
    fn test_empty_phase_cycle_rejected() {
        let config = SimulationConfig {
            phase_cycle: Some(vec![]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_cycle_prefers_explicit() {
        let config = SimulationConfig {
            phase_cycle: Some(vec![1, 1, 0]),
            ..Default::default()
        };
        assert_eq!(config.effective_cycle().unwrap().labels(), &[1, 1, 0]);
    }

    #[test]
    fn test_logging_level_validation() {
        let bad = LoggingConfig {
            level: "loud".to_string(),
        };
        assert!(bad.validate().is_err());

        let upper = LoggingConfig {
            level: "DEBUG".to_string(),
        };
        assert!(upper.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            phase_cycle = [0, 1]

            [units]
            capacity = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.units.capacity, 3);
        assert_eq!(config.units.count, 3);
        assert_eq!(config.phase_cycle, Some(vec![0, 1]));
        assert_eq!(config.stimulus, StimulusConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SimulationConfig {
            units: UnitConfig {
                count: 2,
                capacity: 2,
                weights: Some(vec![0.25, 0.75]),
            },
            phase_cycle: Some(vec![0, 1, 1]),
            ..Default::default()
        };
        let rendered = config.to_toml().unwrap();
        let back: SimulationConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(back, config);
    }
}
