//! `run`: simulate every step and print the outcome.

use clap::Args;
use phasegate_core::{SimulationConfig, SimulationReport, UnitId};
use tracing::{error, info};

use super::{build_driver, print_record, SimArgs};
use crate::error::{CliError, CliExitCode};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub sim: SimArgs,

    /// Output the full report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Handle `run`. Returns the process exit code.
pub fn handle_run(args: RunArgs, config: SimulationConfig) -> i32 {
    match run(&args, config) {
        Ok(()) => CliExitCode::Success.into(),
        Err(e) => {
            error!("Simulation failed: {}", e);
            eprintln!("Error: {}", e);
            e.exit_code().into()
        }
    }
}

fn run(args: &RunArgs, config: SimulationConfig) -> Result<(), CliError> {
    let config = args.sim.apply(config)?;
    let mut driver = build_driver(&config)?;
    let report = driver.run();
    info!(
        run_id = %report.run_id,
        steps = report.records.len(),
        "Simulation complete"
    );

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("Phase-gated unit simulation");
    println!("===========================");
    println!(
        "Units: {} | Window: {} | Cycle: {:?} | Seed: {}",
        config.units.count,
        config.units.capacity,
        report.cycle,
        config.stimulus.seed
    );
    println!();

    for record in &report.records {
        print_record(record);
        println!();
    }

    print_summary(&report, driver.units().iter().map(|u| (u.id(), u.last_output())));
    Ok(())
}

fn print_summary(report: &SimulationReport, outputs: impl Iterator<Item = (UnitId, f64)>) {
    println!("Summary");
    println!("-------");
    for (id, last_output) in outputs {
        println!(
            "  Unit {}: fired {} of {} steps, last output {:.2}",
            id,
            report.fire_count(id),
            report.records.len(),
            last_output
        );
    }
}
