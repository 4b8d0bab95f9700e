use std::fmt;

/// 1-based Monte-Carlo run identifier. Displays as a bare integer to match
/// the `sim_id;timestamp;proposer_validator` wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct SimId(pub u32);

impl fmt::Display for SimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SimId {
    fn from(value: u32) -> Self {
        SimId(value)
    }
}

/// 0-based validator identity. `Ord` so the included set can be sorted by
/// identity with a plain `sort_by_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ValidatorId(pub u32);

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ValidatorId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for ValidatorId {
    fn from(value: u32) -> Self {
        ValidatorId(value)
    }
}
