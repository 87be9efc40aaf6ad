//! `replay`: rebuild the state at a given step.
//!
//! The dashboard's "next step" control re-runs steps 1..N on every click.
//! This command does the same from a clean driver, so the printed state is
//! exactly what a direct run would hold after step N.

use clap::Args;
use phasegate_core::{SimulationConfig, StepRecord, UnitSnapshot};
use serde::Serialize;
use tracing::{error, info};

use super::{build_driver, print_record, SimArgs};
use crate::error::{CliError, CliExitCode};

/// Arguments for the replay command.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// 1-based step to rebuild
    #[arg(short, long)]
    pub step: usize,

    #[command(flatten)]
    pub sim: SimArgs,

    /// Output as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ReplayView {
    step: usize,
    total_steps: usize,
    record: StepRecord,
    units: Vec<UnitSnapshot>,
}

/// Handle `replay`. Returns the process exit code.
pub fn handle_replay(args: ReplayArgs, config: SimulationConfig) -> i32 {
    match replay(&args, config) {
        Ok(()) => CliExitCode::Success.into(),
        Err(e) => {
            error!("Replay failed: {}", e);
            eprintln!("Error: {}", e);
            e.exit_code().into()
        }
    }
}

fn replay(args: &ReplayArgs, config: SimulationConfig) -> Result<(), CliError> {
    let config = args.sim.apply(config)?;
    let mut driver = build_driver(&config)?;
    let record = driver.replay_to(args.step)?;
    info!(step = args.step, total = driver.total_steps(), "Replay complete");

    let view = ReplayView {
        step: args.step,
        total_steps: driver.total_steps(),
        record,
        units: driver.units().iter().map(|u| u.snapshot()).collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Replay: step {} of {}", view.step, view.total_steps);
    println!();
    print_record(&view.record);
    println!();
    println!("Unit state");
    for unit in driver.units() {
        println!("  {}", unit);
    }
    if view.step < view.total_steps {
        println!();
        println!("Next: phasegate replay --step {}", view.step + 1);
    }
    Ok(())
}
