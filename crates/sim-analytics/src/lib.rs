//! Streaming analytics consumed by the batch CLI: bounded-memory quantile
//! estimation and the monthly SLA analyzer built on top of it.

pub mod exact;
pub mod monthly;
pub mod reservoir;

pub use monthly::{EfficiencyMode, MonthRow, MonthlyAnalyzer, SECONDS_PER_MONTH};
pub use reservoir::Reservoir;
