use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use sim_core::rng::floor_seconds;
use sim_core::SimRng;
use sim_types::{FaultRecord, SimId, SimulationConfig};

use crate::io;

/// Single-validator failure/recovery process run in isolation - no
/// consensus, no quorum, just the compound Poisson process also driving
/// `sim-core`'s per-validator failure scheduling, run to exhaustion over
/// the simulation duration. Reuses the main engine's parameters so the
/// two tools cannot silently drift apart on the failure model.
fn simulate_one(
    sim_id: SimId,
    duration_seconds: i64,
    lambda_short: f64,
    lambda_long: f64,
    mean_short: f64,
    mean_long: f64,
    clip: bool,
    rng: &mut SimRng,
) -> (Vec<FaultRecord>, f64) {
    let mut records = Vec::new();
    let lambda_total = lambda_short + lambda_long;
    if lambda_total <= 0.0 {
        return (records, 0.0);
    }

    let mut t = 0.0f64;
    let mut total_downtime = 0i64;

    loop {
        let wait = rng.exponential(lambda_total);
        t += wait;
        if t >= duration_seconds as f64 {
            break;
        }
        let is_short = rng.bernoulli(lambda_short / lambda_total);
        let dur = if is_short {
            if mean_short > 0.0 {
                rng.exponential(1.0 / mean_short)
            } else {
                0.0
            }
        } else if mean_long > 0.0 {
            rng.exponential(1.0 / mean_long)
        } else {
            0.0
        };

        let start = floor_seconds(t);
        let remaining = duration_seconds - start;
        if remaining <= 0 {
            break;
        }

        let mut dur_int = if dur <= 0.0 { 1 } else { dur.ceil() as i64 };
        if dur_int < 1 {
            dur_int = 1;
        }
        if clip {
            dur_int = dur_int.min(remaining);
        }
        if dur_int <= 0 {
            continue;
        }

        records.push(FaultRecord {
            sim_id,
            timestamp: start,
            duration: dur_int,
        });
        total_downtime += dur_int;
    }

    let pct = if duration_seconds > 0 {
        total_downtime as f64 / duration_seconds as f64 * 100.0
    } else {
        0.0
    };
    (records, pct)
}

pub fn run(
    config_path: &Path,
    runs: Option<u32>,
    hours: Option<f64>,
    seed: Option<u64>,
    clip: bool,
    out: &Path,
) -> Result<()> {
    let raw = fs::read_to_string(config_path)
        .with_context(|| format!("reading config file {}", config_path.display()))?;
    let config: SimulationConfig = serde_json::from_str(&raw)?;

    let num_simulations = runs.unwrap_or(config.num_simulations);
    let duration_seconds = match hours {
        Some(h) => (h * 3600.0) as i64,
        None => config.simulation_duration_seconds(),
    };

    let lambda_short = if config.t_fails_short_days > 0.0 {
        1.0 / config.t_fails_short_seconds()
    } else {
        0.0
    };
    let lambda_long = if config.t_fails_long_days > 0.0 {
        1.0 / config.t_fails_long_seconds()
    } else {
        0.0
    };
    let mean_short = config.mean_short_offline_seconds();
    let mean_long = config.mean_long_offline_seconds();

    let mut rng = SimRng::from_seed(seed.unwrap_or(0));
    let mut all_records = Vec::new();
    let mut percentages = Vec::new();

    for n in 1..=num_simulations {
        let (records, pct) = simulate_one(
            SimId(n),
            duration_seconds,
            lambda_short,
            lambda_long,
            mean_short,
            mean_long,
            clip,
            &mut rng,
        );
        all_records.extend(records);
        percentages.push(pct);
    }

    let mean_pct = if percentages.is_empty() {
        0.0
    } else {
        percentages.iter().sum::<f64>() / percentages.len() as f64
    };

    io::write_faults_report(out, &all_records, &config, mean_pct)?;
    tracing::info!(
        faults = all_records.len(),
        mean_inoperability_pct = mean_pct,
        path = %out.display(),
        "wrote faults report"
    );
    Ok(())
}
