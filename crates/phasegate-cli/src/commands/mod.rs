//! CLI command handlers
//!
//! # Modules
//!
//! - `run`: run a full simulation and print every step
//! - `replay`: rebuild the state at one step by replaying from step 1
//! - `show_config`: print the effective configuration

pub mod replay;
pub mod run;
pub mod show_config;

use clap::Args;
use phasegate_core::{
    Activation, GateResult, SimulationConfig, StepDriver, StepRecord, UnitReading,
};

/// Overrides applied on top of the loaded configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct SimArgs {
    /// RNG seed for the input stream
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of steps (input stream length)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Number of units; unit i gets phase label i
    #[arg(long)]
    pub units: Option<usize>,

    /// Window capacity of each unit
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Phase cycle, comma separated (default: 0..units)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cycle: Option<Vec<i64>>,

    /// Custom weights, oldest first, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub weights: Option<Vec<f64>>,
}

impl SimArgs {
    /// Apply the overrides and re-validate.
    pub fn apply(&self, mut config: SimulationConfig) -> GateResult<SimulationConfig> {
        if let Some(seed) = self.seed {
            config.stimulus.seed = seed;
        }
        if let Some(steps) = self.steps {
            config.stimulus.length = steps;
        }
        if let Some(units) = self.units {
            config.units.count = units;
        }
        if let Some(capacity) = self.capacity {
            config.units.capacity = capacity;
        }
        if let Some(cycle) = &self.cycle {
            config.phase_cycle = Some(cycle.clone());
        }
        if let Some(weights) = &self.weights {
            config.units.weights = Some(weights.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Generate the input stream and build a driver positioned before step 1.
pub fn build_driver(config: &SimulationConfig) -> GateResult<StepDriver> {
    let inputs = config.stimulus.generate()?;
    StepDriver::from_config(config, inputs)
}

/// Render a window as `[a, b, c]`.
pub fn format_history(history: &[f64]) -> String {
    let items: Vec<String> = history.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// One line per unit, in the style of the console simulator.
pub fn format_reading(reading: &UnitReading) -> String {
    let history = format_history(&reading.history);
    match reading.activation {
        Activation::Silent => format!(
            "  Unit {} OUT OF SYNC | Phase: {} | History: {}",
            reading.unit_id, reading.unit_phase, history
        ),
        Activation::Warming => format!(
            "  Unit {} IN SYNC -> window not full ({} inputs) | History: {}",
            reading.unit_id,
            reading.history.len(),
            history
        ),
        Activation::Fired(output) => format!(
            "  Unit {} IN SYNC -> Output: {:.2} | History: {}",
            reading.unit_id, output, history
        ),
    }
}

pub fn print_record(record: &StepRecord) {
    println!(
        "Step {} | Input: {} | Global Phase: {}",
        record.step, record.input, record.global_phase
    );
    for reading in &record.readings {
        println!("{}", format_reading(reading));
    }
}
