//! `config`: print the effective configuration.

use clap::Args;
use phasegate_core::SimulationConfig;

use crate::error::{CliError, CliExitCode};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ShowConfigArgs {
    /// Output as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}

pub fn handle_show_config(args: ShowConfigArgs, config: SimulationConfig) -> i32 {
    match render(&args, &config) {
        Ok(text) => {
            println!("{}", text);
            CliExitCode::Success.into()
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code().into()
        }
    }
}

fn render(args: &ShowConfigArgs, config: &SimulationConfig) -> Result<String, CliError> {
    if args.json {
        return Ok(serde_json::to_string_pretty(config)?);
    }
    let cycle = config.effective_cycle()?;
    let mut text = config.to_toml()?;
    text.push_str(&format!("\n# effective phase cycle: {:?}\n", cycle.labels()));
    Ok(text)
}
