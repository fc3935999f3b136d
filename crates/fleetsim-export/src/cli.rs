//! Command-line interface for the exporter.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Generate the simulated fleet day and write it out as JSON.
#[derive(Debug, Parser)]
#[command(name = "fleetsim-export", version, about)]
pub struct Cli {
    /// Seed for the dataset. The same seed always produces the same files.
    #[arg(long, env = "FLEETSIM_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Scenario catalog YAML. Defaults to the embedded catalog.
    #[arg(long, env = "FLEETSIM_SCENARIOS", value_name = "FILE")]
    pub scenarios: Option<PathBuf>,

    /// Fleet roster YAML. Defaults to the embedded 15-server fleet.
    #[arg(long, env = "FLEETSIM_SERVERS", value_name = "FILE")]
    pub servers: Option<PathBuf>,

    /// Output directory (created if missing).
    #[arg(short, long, default_value = "out", value_name = "DIR")]
    pub out: PathBuf,

    /// Write 24 hour-NN.json files instead of one fixed-24h.json.
    #[arg(long)]
    pub hourly: bool,

    /// Compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
