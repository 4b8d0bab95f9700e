use crate::ids::{SimId, ValidatorId};

/// One line of a per-run block event stream: `sim_id;timestamp;proposer_validator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlockRecord {
    pub sim_id: SimId,
    pub timestamp: i64,
    pub proposer: ValidatorId,
}

/// One line of the single-validator failure-distribution sub-report:
/// `sim_id;timestamp;duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FaultRecord {
    pub sim_id: SimId,
    pub timestamp: i64,
    pub duration: i64,
}
