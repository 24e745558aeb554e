//! evs-pipeline — EV charging-station siting along Brazilian highway
//! corridors.
//!
//! Reads a TOML config describing routes, vehicles, and scoring weights;
//! for each route fetches the driving geometry, sweeps public APIs for
//! candidate POIs and competitor stations, reconstructs the SNV corridor
//! for a traffic figure, and writes a ranked candidate table plus an
//! interactive map per vehicle profile.
//!
//! Logging goes through `env_logger`; `RUST_LOG=evs=debug` shows per-call
//! sweep detail.

mod config;
mod run;


use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use config::PipelineConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML run configuration.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured output directory.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = PipelineConfig::load(&args.config)
        .with_context(|| format!("loading config {:?}", args.config))?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    run::run(&config)
}
