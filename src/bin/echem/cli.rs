use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "echem",
    about = "Emergent chemistry simulator",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a simulation from a scenario file or a built-in preset
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// List the loaded element table
    #[command(visible_alias = "e")]
    Elements(ElementsArgs),
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceOptions,

    #[command(flatten)]
    pub engine: EngineOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Where the initial atoms come from.
#[derive(Args)]
#[command(next_help_heading = "Initial State")]
pub struct SourceOptions {
    /// Scenario file (TOML list of atoms)
    #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Built-in scenario: water, salt, demo, methane (default: demo)
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Element table (JSON) replacing the embedded one
    #[arg(long, value_name = "FILE")]
    pub elements: Option<PathBuf>,
}

#[derive(Args)]
#[command(next_help_heading = "Integration")]
pub struct EngineOptions {
    /// Number of integration steps
    #[arg(short = 'n', long, value_name = "N", default_value = "1000")]
    pub steps: u64,

    /// Timestep in fs
    #[arg(long, value_name = "FS", default_value = "1.0")]
    pub dt: f64,

    /// Thermostat setpoint in K (overrides the scenario)
    #[arg(short, long, value_name = "K")]
    pub temperature: Option<f64>,

    /// Simulation parameters (TOML) replacing the defaults
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// XYZ trajectory file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write a trajectory frame every N steps
    #[arg(long, value_name = "N", default_value = "10", requires = "output")]
    pub every: u64,

    /// SDF snapshot of the final bond graph
    #[arg(long, value_name = "FILE")]
    pub sdf: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ElementsArgs {
    /// Element table (JSON) replacing the embedded one
    #[arg(long, value_name = "FILE")]
    pub elements: Option<PathBuf>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
