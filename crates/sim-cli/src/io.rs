//! File I/O for the simulator's external interfaces. The block stream,
//! aggregated report, and faults report all carry an irregular tail
//! section (blank line + `key;value` config replay) that does not fit a
//! single regular CSV schema, so they are written with a plain buffered
//! writer, matching how the original tooling produced them. The monthly
//! report has a fixed, regular schema and is written with the `csv` crate.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use sim_analytics::MonthRow;
use sim_core::RunSummary;
use sim_types::{BlockRecord, FaultRecord, SimId, SimulationConfig, ValidatorId};

pub fn write_block_stream(path: &Path, records: &[BlockRecord]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "sim_id;timestamp;proposer_validator")?;
    for r in records {
        writeln!(w, "{};{};{}", r.sim_id, r.timestamp, r.proposer)?;
    }
    w.flush()
}

pub fn read_block_stream(path: &Path) -> io::Result<Vec<BlockRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if i == 0 || line.trim().is_empty() {
            continue;
        }
        let mut parts = line.split(';');
        let (Some(sim_id), Some(ts), Some(proposer)) =
            (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        let (Ok(sim_id), Ok(ts), Ok(proposer)) = (
            sim_id.parse::<u32>(),
            ts.parse::<i64>(),
            proposer.parse::<u32>(),
        ) else {
            continue;
        };
        out.push(BlockRecord {
            sim_id: SimId(sim_id),
            timestamp: ts,
            proposer: ValidatorId(proposer),
        });
    }
    Ok(out)
}

pub fn write_monthly_report(path: &Path, rows: &[MonthRow]) -> io::Result<()> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(io::Error::other)?;
    w.write_record(["mes_id", "percentil99", "percentil99_9", "eficiencia"])
        .map_err(io::Error::other)?;
    for row in rows {
        w.write_record([
            row.month_id.to_string(),
            format_f64(row.p99),
            format_f64(row.p99_9),
            format!("{:.2}", row.efficiency),
        ])
        .map_err(io::Error::other)?;
    }
    w.flush()
}

fn format_f64(x: f64) -> String {
    if x.is_nan() {
        "N/A".to_string()
    } else {
        format!("{:.2}", x)
    }
}

pub fn write_aggregated_report(
    path: &Path,
    summaries: &[RunSummary],
    config: &SimulationConfig,
) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    let mut intervals: BTreeSet<i64> = BTreeSet::new();
    for s in summaries {
        intervals.extend(s.interval_histogram.keys());
    }
    let intervals: Vec<i64> = intervals.into_iter().collect();

    write!(
        w,
        "sim_id;average_blocks_produced;average_blocks_percentage;minimum_blocks_produced;minimum_blocks_percentage"
    )?;
    for interval in &intervals {
        write!(w, ";interval_{}s", interval)?;
    }
    writeln!(w)?;

    let mut total_blocks = 0u64;
    for s in summaries {
        write!(
            w,
            "{};{:.4};{:.4};{};{:.4}",
            s.sim_id,
            s.average_blocks_per_validator,
            s.average_blocks_percentage,
            s.minimum_blocks_per_validator,
            s.minimum_blocks_percentage
        )?;
        for interval in &intervals {
            write!(w, ";{}", s.interval_histogram.get(interval).unwrap_or(&0))?;
        }
        writeln!(w)?;
        total_blocks += s.total_blocks;
    }

    writeln!(w)?;
    writeln!(w, "num_simulations;{}", config.num_simulations)?;
    writeln!(w, "simulation_duration_days;{}", config.simulation_duration_days)?;
    writeln!(w, "num_validators;{}", config.num_validators)?;
    writeln!(w, "block_time;{}", config.block_time)?;
    writeln!(w, "request_timeout;{}", config.request_timeout)?;
    writeln!(w, "T_fails_short_days;{}", config.t_fails_short_days)?;
    writeln!(w, "T_fails_long_days;{}", config.t_fails_long_days)?;
    writeln!(w, "total de blocos;{}", total_blocks)?;
    writeln!(
        w,
        "intervalos >= 15 minutos;{}",
        summaries.iter().map(|s| s.intervals_over_15_min).sum::<u64>()
    )?;
    writeln!(
        w,
        "intervalos >= 30 minutos;{}",
        summaries.iter().map(|s| s.intervals_over_30_min).sum::<u64>()
    )?;
    writeln!(
        w,
        "intervalos >= 60 minutos;{}",
        summaries.iter().map(|s| s.intervals_over_60_min).sum::<u64>()
    )?;
    writeln!(
        w,
        "intervalos >= 120 minutos;{}",
        summaries.iter().map(|s| s.intervals_over_120_min).sum::<u64>()
    )?;
    w.flush()
}

pub fn write_faults_report(
    path: &Path,
    records: &[FaultRecord],
    config: &SimulationConfig,
    mean_inoperability_pct: f64,
) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "sim_id;timestamp;duration")?;
    for r in records {
        writeln!(w, "{};{};{}", r.sim_id, r.timestamp, r.duration)?;
    }
    writeln!(w)?;
    writeln!(w, "num_simulations;{}", config.num_simulations)?;
    writeln!(w, "T_fails_short_days;{}", config.t_fails_short_days)?;
    writeln!(w, "T_fails_long_days;{}", config.t_fails_long_days)?;
    writeln!(w, "mean_short_offline_minutes;{}", config.mean_short_offline_minutes)?;
    writeln!(w, "mean_long_offline_hours;{}", config.mean_long_offline_hours)?;
    writeln!(w, "simulation_duration_days;{}", config.simulation_duration_days)?;
    writeln!(w, "total_de_falhas;{}", records.len())?;
    writeln!(w, "percentual_medio_inoperancia;{:.6}", mean_inoperability_pct)?;
    w.flush()
}
