//! Phase-gated windowed-average units.
//!
//! A population of toy "neurons", each holding a fixed-size rolling window of
//! recent scalar inputs and emitting a weighted average of that window only
//! on steps where its phase label matches the global phase.
//!
//! # Modules
//!
//! - [`unit`]: [`GatedUnit`], the stateful windowed unit
//! - [`window`]: [`RollingWindow`], the bounded FIFO behind each unit
//! - [`phase`]: [`PhaseCycle`], the repeating global phase sequence
//! - [`driver`]: [`StepDriver`], the ingest/gate/compute step loop
//! - [`stimulus`]: seeded synthetic input streams
//! - [`config`]: layered configuration and validation
//! - [`error`]: error types and result aliases
//!
//! # Example
//!
//! ```
//! use phasegate_core::{SimulationConfig, StepDriver, UnitId};
//!
//! let config = SimulationConfig::default();
//! let inputs = config.stimulus.generate().unwrap();
//! let mut driver = StepDriver::from_config(&config, inputs).unwrap();
//!
//! let report = driver.run();
//! assert_eq!(report.records.len(), 15);
//! assert_eq!(report.series(UnitId(0)).len(), 15);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod phase;
pub mod stimulus;
pub mod unit;
pub mod window;

pub use config::{LoggingConfig, SimulationConfig, UnitConfig};
pub use driver::{Activation, SimulationReport, StepDriver, StepRecord, UnitReading};
pub use error::{GateError, GateResult};
pub use phase::PhaseCycle;
pub use stimulus::StimulusConfig;
pub use unit::{GatedUnit, UnitId, UnitSnapshot};
pub use window::RollingWindow;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_re_exports_exist() {
        let _config = SimulationConfig::default();
        let _stimulus = StimulusConfig::default();
        let _cycle = PhaseCycle::sequential(3).unwrap();
        let _window: RollingWindow<f64> = RollingWindow::new(2).unwrap();
    }

    #[test]
    fn test_default_run_fires_each_unit() {
        let config = SimulationConfig::default();
        let inputs = config.stimulus.generate().unwrap();
        let mut driver = StepDriver::from_config(&config, inputs).unwrap();
        let report = driver.run();

        // 15 steps over a 3-phase cycle: each unit's gate opens 5 times.
        // Windows of 5 are full from step 5 onward.
        assert_eq!(report.fire_count(UnitId(0)), 3); // steps 7, 10, 13
        assert_eq!(report.fire_count(UnitId(1)), 4); // steps 5, 8, 11, 14
        assert_eq!(report.fire_count(UnitId(2)), 4); // steps 6, 9, 12, 15
    }
}
