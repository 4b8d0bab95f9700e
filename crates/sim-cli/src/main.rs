//! # BFT Availability Simulator CLI
//!
//! Batch entry point for the discrete-event simulation engine and the
//! streaming SLA analytics built on top of it.

mod cli;
mod commands;
mod io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            config,
            runs,
            seed,
            out,
            blocks_dir,
            no_blocks,
            merge_blocks,
        } => commands::simulate::run(&config, runs, seed, &out, &blocks_dir, no_blocks, merge_blocks),
        Command::Monthly {
            input,
            config,
            output,
            fixed_window,
        } => commands::monthly::run(&input, &config, &output, fixed_window),
        Command::Faults {
            config,
            runs,
            hours,
            seed,
            clip,
            out,
        } => commands::faults::run(&config, runs, hours, seed, clip, &out),
        Command::Quantile {
            input,
            value1,
            value2,
            tol,
            perc,
        } => commands::quantile::run(&input, value1, value2, tol, perc),
    }
}
