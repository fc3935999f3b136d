#![forbid(unsafe_code)]

//! # fleetsim-export
//!
//! Builds the simulated fleet day and serializes it to disk: either one
//! `fixed-24h.json` document or 24 `hour-NN.json` slices for consumers that
//! load an hour at a time.

mod cli;

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use fleetsim::{FleetDataset, FleetRoster, ScenarioCatalog, Server24hDataset};

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let roster = match &cli.servers {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading roster {}", path.display()))?;
            FleetRoster::from_yaml(&text).context("invalid fleet roster")?
        }
        None => FleetRoster::embedded().context("embedded fleet roster")?,
    };
    let catalog = match &cli.scenarios {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading scenario catalog {}", path.display()))?;
            ScenarioCatalog::from_yaml(&text, &roster).context("invalid scenario catalog")?
        }
        None => ScenarioCatalog::embedded(&roster).context("embedded scenario catalog")?,
    };
    info!(
        servers = roster.len(),
        scenarios = catalog.scenarios().len(),
        seed = cli.seed,
        "generating dataset"
    );

    let dataset = FleetDataset::build(&roster, &catalog, cli.seed);

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;

    if cli.hourly {
        for hour in 0..24u16 {
            let slice = hourly_slice(&dataset, hour);
            let path = cli.out.join(format!("hour-{hour:02}.json"));
            write_json(&path, &slice, cli.compact)?;
            debug!(hour, path = %path.display(), "wrote hourly slice");
        }
        info!(dir = %cli.out.display(), "wrote 24 hourly files");
    } else {
        let path = cli.out.join("fixed-24h.json");
        write_json(&path, &dataset, cli.compact)?;
        info!(path = %path.display(), "wrote full dataset");
    }

    Ok(())
}

/// The dataset restricted to one hour's six samples per server.
fn hourly_slice(dataset: &FleetDataset, hour: u16) -> FleetDataset {
    let servers = dataset
        .servers
        .iter()
        .map(|server| Server24hDataset {
            server_id: server.server_id.clone(),
            server_type: server.server_type,
            location: server.location.clone(),
            baseline: server.baseline,
            data: server
                .data
                .iter()
                .filter(|s| s.minute_of_day / 60 == hour)
                .cloned()
                .collect(),
        })
        .collect();
    FleetDataset {
        seed: dataset.seed,
        servers,
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
