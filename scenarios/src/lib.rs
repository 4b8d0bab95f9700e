//! Concrete end-to-end scenarios for the BFT availability simulator.
//!
//! ```text
//! scenarios/
//!   tests/
//!     scenarios.rs   - S1-S6: happy path, failures, quorum loss/reset,
//!                      adjust eviction/readmission, monthly analysis,
//!                      reservoir quantile accuracy
//! ```
//!
//! Run with `cargo test -p sim-scenarios`.
