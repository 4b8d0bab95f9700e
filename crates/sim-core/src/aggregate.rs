//! Per-run aggregator: consumes one simulation's block stream and derives
//! the interval histogram, per-proposer counts, and summary statistics.

use std::collections::BTreeMap;

use sim_types::{BlockRecord, SimId, ValidatorId};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sim_id: SimId,
    pub total_blocks: u64,
    /// Interval-in-seconds -> occurrence count, ordered so CSV columns
    /// come out sorted without an extra sort step.
    pub interval_histogram: BTreeMap<i64, u64>,
    pub proposer_counts: Vec<u64>,
    pub average_blocks_per_validator: f64,
    pub average_blocks_percentage: f64,
    pub minimum_blocks_per_validator: u64,
    pub minimum_blocks_percentage: f64,
    pub intervals_over_15_min: u64,
    pub intervals_over_30_min: u64,
    pub intervals_over_60_min: u64,
    pub intervals_over_120_min: u64,
}

impl RunSummary {
    pub fn from_blocks(sim_id: SimId, blocks: &[BlockRecord], validator_count: usize) -> Self {
        let mut interval_histogram = BTreeMap::new();
        let mut proposer_counts = vec![0u64; validator_count];
        let mut intervals_over_15_min = 0;
        let mut intervals_over_30_min = 0;
        let mut intervals_over_60_min = 0;
        let mut intervals_over_120_min = 0;

        for (i, block) in blocks.iter().enumerate() {
            let idx = block.proposer.index();
            if idx < proposer_counts.len() {
                proposer_counts[idx] += 1;
            }
            if i > 0 {
                let prev = blocks[i - 1];
                let interval = block.timestamp - prev.timestamp;
                *interval_histogram.entry(interval).or_insert(0) += 1;
                // Independent cumulative counts, not mutually exclusive buckets:
                // a 61-minute interval counts toward >=15, >=30, and >=60 alike.
                if interval >= 15 * 60 {
                    intervals_over_15_min += 1;
                }
                if interval >= 30 * 60 {
                    intervals_over_30_min += 1;
                }
                if interval >= 60 * 60 {
                    intervals_over_60_min += 1;
                }
                if interval >= 120 * 60 {
                    intervals_over_120_min += 1;
                }
            }
        }

        let total_blocks = blocks.len() as u64;
        let average = if validator_count > 0 {
            total_blocks as f64 / validator_count as f64
        } else {
            0.0
        };
        let average_percentage = if total_blocks > 0 {
            100.0 * average / total_blocks as f64
        } else {
            0.0
        };
        let minimum = proposer_counts.iter().copied().min().unwrap_or(0);
        let minimum_percentage = if total_blocks > 0 {
            100.0 * minimum as f64 / total_blocks as f64
        } else {
            0.0
        };

        Self {
            sim_id,
            total_blocks,
            interval_histogram,
            proposer_counts,
            average_blocks_per_validator: average,
            average_blocks_percentage: average_percentage,
            minimum_blocks_per_validator: minimum,
            minimum_blocks_percentage: minimum_percentage,
            intervals_over_15_min,
            intervals_over_30_min,
            intervals_over_60_min,
            intervals_over_120_min,
        }
    }

    pub fn proposer_count(&self, id: ValidatorId) -> u64 {
        self.proposer_counts.get(id.index()).copied().unwrap_or(0)
    }
}
