//! Phasegate CLI
//!
//! Runs phase-gated unit simulations and prints the outcome of every step.
//!
//! # Commands
//!
//! - `run`: simulate the whole input stream
//! - `replay --step N`: rebuild the state at step N
//! - `config`: print the effective configuration
//!
//! Configuration comes from `--config <file>` and `PHASEGATE__*` environment
//! variables; command flags override both. Logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use phasegate_core::SimulationConfig;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

use error::{exit_code_for_error, CliError};

/// Phasegate - phase-gated windowed-average simulator
#[derive(Parser, Debug)]
#[command(name = "phasegate")]
#[command(version)]
#[command(about = "Simulate phase-gated units over a sliding input window")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full simulation
    Run(commands::run::RunArgs),
    /// Rebuild the state at one step by replaying from step 1
    Replay(commands::replay::ReplayArgs),
    /// Print the effective configuration
    Config(commands::show_config::ShowConfigArgs),
}

/// Log filter from `-v` count, else `RUST_LOG`, else `fallback_level`.
fn log_filter(verbose: u8, fallback_level: &str) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_level.to_ascii_lowercase())),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn init_logging(verbose: u8, configured_level: &str) {
    fmt()
        .with_env_filter(log_filter(verbose, configured_level))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration under a scoped subscriber so events emitted while
/// loading honour `-v` and `RUST_LOG`. The configured level is not known yet.
fn load_config(cli: &Cli) -> Result<SimulationConfig, CliError> {
    let provisional = fmt()
        .with_env_filter(log_filter(cli.verbose, "info"))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::with_default(provisional, || {
        SimulationConfig::load(cli.config.as_deref()).map_err(CliError::from)
    })
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code_for_error(&e).into());
        }
    };

    init_logging(cli.verbose, &config.logging.level);
    tracing::debug!(?config, "Configuration loaded");

    let exit_code = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args, config),
        Commands::Replay(args) => commands::replay::handle_replay(args, config),
        Commands::Config(args) => commands::show_config::handle_show_config(args, config),
    };

    std::process::exit(exit_code);
}
