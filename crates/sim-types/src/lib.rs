//! Shared vocabulary for the BFT availability simulator: identifiers, wire
//! records, the simulation configuration schema, and the error taxonomy
//! every other crate in the workspace reports through.

pub mod config;
pub mod error;
pub mod ids;
pub mod records;

pub use config::SimulationConfig;
pub use error::{SimError, SimResult};
pub use ids::{SimId, ValidatorId};
pub use records::{BlockRecord, FaultRecord};
