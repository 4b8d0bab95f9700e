use sim_types::{SimError, ValidatorId};

/// Liveness state of one validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Online,
    Failing,
}

/// A single consensus participant. Owned directly by `Simulation` in a
/// vector indexed by identity; never removed or reordered, only flagged
/// out of the included set.
#[derive(Debug, Clone)]
pub struct Validator {
    pub id: ValidatorId,
    pub liveness: Liveness,
    pub included: bool,
    /// Probability this validator's operator attends a given meeting.
    pub operator_reliability: f64,
    pub operator_present: bool,
    offline_start: Option<i64>,
    pub offline_intervals: Vec<(i64, i64)>,
    pub blocks_proposed: u64,
    pub proposed_in_adjust_window: bool,
}

impl Validator {
    pub fn new(id: ValidatorId, operator_reliability: f64) -> Self {
        Self {
            id,
            liveness: Liveness::Online,
            included: true,
            operator_reliability,
            operator_present: true,
            offline_start: None,
            offline_intervals: Vec::new(),
            blocks_proposed: 0,
            proposed_in_adjust_window: false,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self.liveness, Liveness::Online)
    }

    pub fn is_failing(&self) -> bool {
        matches!(self.liveness, Liveness::Failing)
    }

    /// Requires the validator is currently online. Opens an offline
    /// interval at `now`.
    pub fn fail(&mut self, now: i64) -> Result<(), SimError> {
        if !self.is_online() {
            return Err(SimError::invariant(
                now,
                format!("validator {} failed while not online", self.id),
            ));
        }
        self.liveness = Liveness::Failing;
        self.offline_start = Some(now);
        Ok(())
    }

    /// Requires the validator is currently failing. Closes the open
    /// interval `(offline_start, now)`.
    pub fn recover(&mut self, now: i64) -> Result<(), SimError> {
        let start = self.offline_start.take().ok_or_else(|| {
            SimError::invariant(now, format!("validator {} recovered while not failing", self.id))
        })?;
        if !self.is_failing() {
            return Err(SimError::invariant(
                now,
                format!("validator {} recovered while not failing", self.id),
            ));
        }
        self.liveness = Liveness::Online;
        self.offline_intervals.push((start, now));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v() -> Validator {
        Validator::new(ValidatorId(0), 0.9)
    }

    #[test]
    fn starts_online_and_included() {
        let validator = v();
        assert!(validator.is_online());
        assert!(validator.included);
    }

    #[test]
    fn fail_then_recover_closes_one_interval() {
        let mut validator = v();
        validator.fail(100).unwrap();
        assert!(validator.is_failing());
        validator.recover(250).unwrap();
        assert!(validator.is_online());
        assert_eq!(validator.offline_intervals, vec![(100, 250)]);
    }

    #[test]
    fn fail_while_failing_is_rejected() {
        let mut validator = v();
        validator.fail(10).unwrap();
        assert!(validator.fail(20).is_err());
    }

    #[test]
    fn recover_while_online_is_rejected() {
        let mut validator = v();
        assert!(validator.recover(10).is_err());
    }

    #[test]
    fn intervals_accumulate_and_are_disjoint_increasing() {
        let mut validator = v();
        validator.fail(0).unwrap();
        validator.recover(10).unwrap();
        validator.fail(50).unwrap();
        validator.recover(60).unwrap();
        let intervals = &validator.offline_intervals;
        for w in intervals.windows(2) {
            assert!(w[0].1 <= w[1].0);
        }
    }
}
