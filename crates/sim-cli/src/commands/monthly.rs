use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use sim_analytics::{EfficiencyMode, MonthlyAnalyzer};
use sim_types::SimulationConfig;

use crate::io;

pub fn run(input: &Path, config_path: &Path, output: &Path, fixed_window: bool) -> Result<()> {
    let raw = fs::read_to_string(config_path)
        .with_context(|| format!("reading config file {}", config_path.display()))?;
    let config: SimulationConfig = serde_json::from_str(&raw)?;

    let records = io::read_block_stream(input)
        .with_context(|| format!("reading block stream {}", input.display()))?;

    let mode = if fixed_window {
        EfficiencyMode::FixedWindow
    } else {
        EfficiencyMode::SpanBased
    };
    let mut analyzer = MonthlyAnalyzer::new(config.block_time, mode);
    for record in &records {
        analyzer.record(record);
    }

    let rows = analyzer.rows();
    io::write_monthly_report(output, &rows)?;
    tracing::info!(months = rows.len(), path = %output.display(), "wrote monthly report");
    Ok(())
}
