//! Configuration schema for the simulation engine.

use serde::Deserialize;

use crate::error::SimError;

/// Parsed `simulation_config.json` document. Every field carries the same
/// default as the prototype scripts it was distilled from.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_simulations: u32,
    pub simulation_duration_days: f64,
    pub num_validators: u32,
    pub block_time: f64,
    pub request_timeout: f64,

    #[serde(rename = "T_fails_short_days")]
    pub t_fails_short_days: f64,
    #[serde(rename = "T_fails_long_days")]
    pub t_fails_long_days: f64,

    pub mean_short_offline_minutes: f64,
    pub mean_long_offline_hours: f64,

    #[serde(alias = "meeting_interval_in_hours")]
    pub reset_meeting_interval_in_hours: f64,

    /// Defaults to `reset_meeting_interval_in_hours` at load time when
    /// absent from the document, matching the original tooling's reuse of
    /// one meeting interval for both protocols.
    pub adjust_meeting_interval_in_hours: Option<f64>,

    /// `0` disables the block-count-triggered adjust variant.
    pub adjust_procedure_interval_in_blocks: u32,
    pub adjust_procedure_call_failure_probability: f64,
    pub p_operator_absence: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1,
            simulation_duration_days: 30.0,
            num_validators: 10,
            block_time: 5.0,
            request_timeout: 2.0,
            t_fails_short_days: 1.0,
            t_fails_long_days: 10.0,
            mean_short_offline_minutes: 5.0,
            mean_long_offline_hours: 12.0,
            reset_meeting_interval_in_hours: 24.0,
            adjust_meeting_interval_in_hours: None,
            adjust_procedure_interval_in_blocks: 0,
            adjust_procedure_call_failure_probability: 0.0,
            p_operator_absence: 0.1,
        }
    }
}

impl SimulationConfig {
    pub fn simulation_duration_seconds(&self) -> i64 {
        (self.simulation_duration_days * 86_400.0) as i64
    }

    pub fn t_fails_short_seconds(&self) -> f64 {
        self.t_fails_short_days * 86_400.0
    }

    pub fn t_fails_long_seconds(&self) -> f64 {
        self.t_fails_long_days * 86_400.0
    }

    pub fn mean_short_offline_seconds(&self) -> f64 {
        self.mean_short_offline_minutes * 60.0
    }

    pub fn mean_long_offline_seconds(&self) -> f64 {
        self.mean_long_offline_hours * 3600.0
    }

    pub fn reset_meeting_interval_seconds(&self) -> i64 {
        (self.reset_meeting_interval_in_hours * 3600.0) as i64
    }

    /// Falls back to the reset interval when the adjust-meeting interval is
    /// unset, matching the original tooling.
    pub fn adjust_meeting_interval_seconds(&self) -> i64 {
        let hours = self
            .adjust_meeting_interval_in_hours
            .unwrap_or(self.reset_meeting_interval_in_hours);
        (hours * 3600.0) as i64
    }

    /// Sole source of configuration errors. Called once, before any
    /// `Simulation` is constructed.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.num_simulations == 0 {
            return Err(SimError::Config("num_simulations must be > 0".into()));
        }
        if self.num_validators == 0 {
            return Err(SimError::Config("num_validators must be > 0".into()));
        }
        if self.simulation_duration_days <= 0.0 {
            return Err(SimError::Config(
                "simulation_duration_days must be > 0".into(),
            ));
        }
        if self.block_time <= 0.0 {
            return Err(SimError::Config("block_time must be > 0".into()));
        }
        if self.request_timeout <= 0.0 {
            return Err(SimError::Config("request_timeout must be > 0".into()));
        }
        if self.t_fails_short_days < 0.0 || self.t_fails_long_days < 0.0 {
            return Err(SimError::Config(
                "T_fails_short_days and T_fails_long_days must be >= 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.p_operator_absence) {
            return Err(SimError::Config(
                "p_operator_absence must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.adjust_procedure_call_failure_probability) {
            return Err(SimError::Config(
                "adjust_procedure_call_failure_probability must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
