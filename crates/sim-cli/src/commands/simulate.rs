use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use sim_core::{RunSummary, Simulation};
use sim_types::{SimId, SimulationConfig};

use crate::io;

#[allow(clippy::too_many_arguments)]
pub fn run(
    config_path: &Path,
    runs: Option<u32>,
    seed: Option<u64>,
    out: &Path,
    blocks_dir: &Path,
    no_blocks: bool,
    merge_blocks: Option<PathBuf>,
) -> Result<()> {
    let raw = fs::read_to_string(config_path)
        .with_context(|| format!("reading config file {}", config_path.display()))?;
    let mut config: SimulationConfig = serde_json::from_str(&raw)?;
    if let Some(runs) = runs {
        config.num_simulations = runs;
    }
    config.validate()?;

    let base_seed = seed.unwrap_or(0);
    if !no_blocks {
        fs::create_dir_all(blocks_dir)?;
    }

    let outcomes: Vec<Result<(RunSummary, PathBuf)>> = (1..=config.num_simulations)
        .into_par_iter()
        .map(|n| {
            let sim_id = SimId(n);
            let sim = Simulation::new(sim_id, config.clone(), base_seed + n as u64);
            let output = sim.run()?;
            let summary = RunSummary::from_blocks(sim_id, &output.blocks, config.num_validators as usize);

            let block_path = blocks_dir.join(format!("blocks_{}.csv", n));
            if !no_blocks {
                io::write_block_stream(&block_path, &output.blocks)?;
            }
            Ok((summary, block_path))
        })
        .collect();

    let mut summaries = Vec::with_capacity(outcomes.len());
    let mut failures = 0u32;
    for outcome in outcomes {
        match outcome {
            Ok((summary, _)) => summaries.push(summary),
            Err(e) => {
                tracing::warn!(error = %e, "simulation run failed, excluded from report");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        tracing::warn!(failures, "some runs failed; other runs were unaffected");
    }

    io::write_aggregated_report(out, &summaries, &config)?;
    tracing::info!(runs = summaries.len(), path = %out.display(), "wrote aggregated report");

    if let Some(merged_path) = merge_blocks {
        if no_blocks {
            tracing::warn!("--merge-blocks requested but --no-blocks was set; skipping merge");
        } else {
            merge_block_files(blocks_dir, &merged_path, config.num_simulations)?;
        }
    }

    Ok(())
}

fn merge_block_files(blocks_dir: &Path, merged_path: &Path, num_simulations: u32) -> Result<()> {
    use std::io::Write;
    let mut merged = std::io::BufWriter::new(fs::File::create(merged_path)?);
    writeln!(merged, "sim_id;timestamp;proposer_validator")?;
    for n in 1..=num_simulations {
        let path = blocks_dir.join(format!("blocks_{}.csv", n));
        let records = io::read_block_stream(&path)?;
        for r in records {
            writeln!(merged, "{};{};{}", r.sim_id, r.timestamp, r.proposer)?;
        }
    }
    Ok(())
}
