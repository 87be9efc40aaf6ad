//! Step driver: broadcasts the global phase and feeds the input stream.
//!
//! Each step runs in a fixed order for every unit, in registration order:
//! ingest the step's input, check the gate, and only then compute. A unit's
//! window therefore fills on every step, including steps where its gate is
//! closed; the phase only decides when the window is *read*.
//!
//! # Example
//!
//! ```
//! use phasegate_core::driver::{Activation, StepDriver};
//! use phasegate_core::phase::PhaseCycle;
//! use phasegate_core::unit::{GatedUnit, UnitId};
//!
//! let unit = GatedUnit::new(UnitId(0), 3, 1).unwrap();
//! let cycle = PhaseCycle::new(vec![0, 1]).unwrap();
//! let mut driver = StepDriver::new(vec![unit], cycle, vec![4.0, 6.0, 8.0, 2.0]).unwrap();
//!
//! let report = driver.run();
//! assert_eq!(report.records.len(), 4);
//! assert!(matches!(report.records[3].readings[0].activation, Activation::Fired(_)));
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::error::{GateError, GateResult};
use crate::phase::PhaseCycle;
use crate::unit::{GatedUnit, UnitId};

/// What a unit did on one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "output", rename_all = "snake_case")]
pub enum Activation {
    /// Gate closed; no value.
    Silent,

    /// Gate open but the window was not yet full. `compute` returned the
    /// `0.0` sentinel and `last_output` was left unchanged.
    Warming,

    /// Gate open with a full window.
    Fired(f64),
}

impl Activation {
    /// True whenever the gate was open, whether or not a value was produced.
    pub fn gate_open(&self) -> bool {
        !matches!(self, Activation::Silent)
    }

    /// True only for [`Activation::Fired`], the one state that updates
    /// `last_output`.
    pub fn fired(&self) -> bool {
        matches!(self, Activation::Fired(_))
    }

    /// The computed value, `None` on every non-firing step.
    ///
    /// A warming step's `0.0` sentinel is not an output and maps to `None`.
    pub fn output(&self) -> Option<f64> {
        match self {
            Activation::Silent | Activation::Warming => None,
            Activation::Fired(value) => Some(*value),
        }
    }
}

/// One unit's outcome for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitReading {
    pub unit_id: UnitId,
    pub unit_phase: i64,
    pub activation: Activation,
    /// Window contents after this step's ingest, oldest to newest.
    pub history: Vec<f64>,
}

impl UnitReading {
    /// True iff the unit produced a value this step.
    pub fn fired(&self) -> bool {
        self.activation.fired()
    }

    /// True iff the unit's gate was open this step, fired or not.
    pub fn gate_open(&self) -> bool {
        self.activation.gate_open()
    }

    /// See [`Activation::output`].
    pub fn output(&self) -> Option<f64> {
        self.activation.output()
    }
}

/// Everything that happened on one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based step number.
    pub step: usize,
    pub input: f64,
    pub global_phase: i64,
    pub readings: Vec<UnitReading>,
}

impl StepRecord {
    /// The reading for `unit_id`, `None` if no such unit took part.
    pub fn reading(&self, unit_id: UnitId) -> Option<&UnitReading> {
        self.readings.iter().find(|r| r.unit_id == unit_id)
    }
}

/// The collected records of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub cycle: Vec<i64>,
    pub inputs: Vec<f64>,
    pub records: Vec<StepRecord>,
}

impl SimulationReport {
    /// Output series for one unit, one entry per recorded step.
    ///
    /// Steps on which the unit did not fire, closed gate or warming window,
    /// are `None`.
    pub fn series(&self, unit_id: UnitId) -> Vec<Option<f64>> {
        self.records
            .iter()
            .map(|record| record.reading(unit_id).and_then(UnitReading::output))
            .collect()
    }

    /// Number of steps on which the unit produced a computed value.
    pub fn fire_count(&self, unit_id: UnitId) -> usize {
        self.records
            .iter()
            .filter_map(|record| record.reading(unit_id))
            .filter(|reading| reading.fired())
            .count()
    }

    /// Pretty-printed JSON rendering of the whole report.
    pub fn to_json(&self) -> GateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Owns the units, the input stream, the phase cycle and the step counter.
#[derive(Debug, Clone)]
pub struct StepDriver {
    units: Vec<GatedUnit>,
    cycle: PhaseCycle,
    inputs: Vec<f64>,
    current_step: usize,
}

impl StepDriver {
    /// Create a driver positioned before step 1.
    ///
    /// # Errors
    ///
    /// `GateError::InvalidConfiguration` if `units` is empty or two units
    /// share an id.
    pub fn new(units: Vec<GatedUnit>, cycle: PhaseCycle, inputs: Vec<f64>) -> GateResult<Self> {
        if units.is_empty() {
            return Err(GateError::invalid("a driver needs at least one unit"));
        }
        let mut seen = HashSet::with_capacity(units.len());
        for unit in &units {
            if !seen.insert(unit.id()) {
                return Err(GateError::invalid(format!(
                    "duplicate unit id {}",
                    unit.id()
                )));
            }
        }

        Ok(Self {
            units,
            cycle,
            inputs,
            current_step: 0,
        })
    }

    /// Build `units.count` units with ids and phase labels `0..count`.
    pub fn from_config(config: &SimulationConfig, inputs: Vec<f64>) -> GateResult<Self> {
        config.validate()?;
        let units = (0..config.units.count)
            .map(|i| GatedUnit::from_config(UnitId(i as u32), i as i64, &config.units))
            .collect::<GateResult<Vec<_>>>()?;
        Self::new(units, config.effective_cycle()?, inputs)
    }

    /// Run the next step. Returns `None` once the input stream is exhausted.
    pub fn step(&mut self) -> Option<StepRecord> {
        let input = *self.inputs.get(self.current_step)?;
        self.current_step += 1;
        let step = self.current_step;
        let global_phase = self.cycle.phase_for_step(step);

        let readings: Vec<UnitReading> = self
            .units
            .iter_mut()
            .map(|unit| {
                unit.ingest(input);
                let activation = if !unit.is_gated_open(global_phase) {
                    Activation::Silent
                } else if unit.is_ready() {
                    Activation::Fired(unit.compute())
                } else {
                    // Short window: compute() returns the 0.0 sentinel.
                    unit.compute();
                    Activation::Warming
                };

                tracing::trace!(
                    step,
                    unit = %unit.id(),
                    ?activation,
                    "Unit reading"
                );

                UnitReading {
                    unit_id: unit.id(),
                    unit_phase: unit.phase(),
                    activation,
                    history: unit.history(),
                }
            })
            .collect();

        tracing::debug!(
            step,
            input,
            global_phase,
            fired = readings.iter().filter(|r| r.fired()).count(),
            "Step complete"
        );

        Some(StepRecord {
            step,
            input,
            global_phase,
            readings,
        })
    }

    /// Run every remaining step and collect the records.
    pub fn run(&mut self) -> SimulationReport {
        let started_at = Utc::now();
        let mut records = Vec::with_capacity(self.inputs.len() - self.current_step);
        while let Some(record) = self.step() {
            records.push(record);
        }
        SimulationReport {
            run_id: Uuid::new_v4(),
            started_at,
            cycle: self.cycle.labels().to_vec(),
            inputs: self.inputs.clone(),
            records,
        }
    }

    /// Rebuild the state at step `n` by resetting and replaying steps
    /// `1..=n`. Returns the record of step `n`.
    ///
    /// # Errors
    ///
    /// `GateError::StepOutOfRange` unless `1 <= n <= total_steps()`.
    pub fn replay_to(&mut self, n: usize) -> GateResult<StepRecord> {
        if n == 0 || n > self.inputs.len() {
            return Err(GateError::StepOutOfRange {
                requested: n,
                available: self.inputs.len(),
            });
        }

        self.reset();
        let mut last = None;
        while self.current_step < n {
            last = self.step();
        }
        tracing::debug!(step = n, "Replayed");
        last.ok_or(GateError::StepOutOfRange {
            requested: n,
            available: self.inputs.len(),
        })
    }

    /// Reset every unit and rewind to before step 1.
    pub fn reset(&mut self) {
        for unit in &mut self.units {
            unit.reset();
        }
        self.current_step = 0;
    }

    /// Number of completed steps.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Length of the input stream.
    pub fn total_steps(&self) -> usize {
        self.inputs.len()
    }

    /// True once every input has been consumed.
    pub fn is_finished(&self) -> bool {
        self.current_step >= self.inputs.len()
    }

    /// Units in registration order.
    pub fn units(&self) -> &[GatedUnit] {
        &self.units
    }

    /// Look up a unit by id.
    pub fn unit(&self, id: UnitId) -> Option<&GatedUnit> {
        self.units.iter().find(|u| u.id() == id)
    }

    /// The phase cycle broadcast each step.
    pub fn cycle(&self) -> &PhaseCycle {
        &self.cycle
    }

    /// The full input stream, consumed or not.
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }
}
