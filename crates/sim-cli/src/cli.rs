use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BFT availability simulator: batch Monte-Carlo runs plus the streaming
/// analytics that turn a block event stream into SLA reports.
#[derive(Parser, Debug)]
#[command(name = "sim-cli")]
#[command(about = "Discrete-event BFT availability simulator and SLA analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the batch orchestrator: M independent simulations from one config.
    Simulate {
        #[arg(long, default_value = "simulation_config.json")]
        config: PathBuf,

        /// Overrides `num_simulations` from the config file.
        #[arg(long)]
        runs: Option<u32>,

        #[arg(long)]
        seed: Option<u64>,

        /// Aggregated per-simulation report path.
        #[arg(long, default_value = "report.csv")]
        out: PathBuf,

        /// Directory for per-run block stream files.
        #[arg(long, default_value = "blocks")]
        blocks_dir: PathBuf,

        /// Skip writing per-run block stream files entirely.
        #[arg(long)]
        no_blocks: bool,

        /// Merge all per-run block streams into a single file after the run.
        #[arg(long)]
        merge_blocks: Option<PathBuf>,
    },

    /// Run the monthly SLA analyzer over an existing block stream file.
    Monthly {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, default_value = "simulation_config.json")]
        config: PathBuf,

        #[arg(long, default_value = "monthly_report.csv")]
        output: PathBuf,

        /// Use the fixed 30-day-window efficiency denominator instead of
        /// the normative span-based one.
        #[arg(long)]
        fixed_window: bool,
    },

    /// Single-validator failure-distribution sub-report.
    Faults {
        #[arg(long, default_value = "simulation_config.json")]
        config: PathBuf,

        #[arg(long)]
        runs: Option<u32>,

        #[arg(long)]
        hours: Option<f64>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = true)]
        clip: bool,

        #[arg(long, default_value = "faults.csv")]
        out: PathBuf,
    },

    /// Exact quantile utility over an already-sorted one-value-per-line file.
    Quantile {
        input: PathBuf,
        value1: f64,
        value2: f64,

        #[arg(long, default_value_t = 0.0)]
        tol: f64,

        /// Interpret value1/value2 as percentiles (percentile -> value)
        /// instead of values (value -> percentile).
        #[arg(long)]
        perc: bool,
    },
}
