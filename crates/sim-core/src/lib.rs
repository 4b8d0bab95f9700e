//! Discrete-event simulation engine for a permissioned BFT blockchain's
//! validator availability and block-production SLA.
//!
//! A single [`driver::Simulation`] is strictly single-threaded and
//! deterministic for a given seed: there is no `async`, no interior
//! mutability, and no I/O inside the event loop. Independent runs are
//! parallelized by the caller (see `sim-cli`), not by this crate.

pub mod aggregate;
pub mod driver;
pub mod events;
pub mod meetings;
pub mod quorum;
pub mod rng;
pub mod validator;

pub use aggregate::RunSummary;
pub use driver::{Simulation, SimulationOutput};
pub use events::{EventKind, EventQueue, FailureKind};
pub use rng::SimRng;
pub use validator::{Liveness, Validator};
