//! Reset and adjust meeting protocols. Pure functions over `&mut
//! [Validator]` plus the scalar state they need; they never touch the
//! event queue directly so they stay unit-testable without one.

use sim_types::ValidatorId;

use crate::quorum::{adjust_quorum_met, network_stopped, reset_quorum_met};
use crate::rng::SimRng;
use crate::validator::Validator;

/// Resamples every validator's operator-present flag: present with
/// probability equal to its operator reliability.
pub fn resample_operator_presence(validators: &mut [Validator], rng: &mut SimRng) {
    for v in validators.iter_mut() {
        v.operator_present = rng.bernoulli(v.operator_reliability);
    }
}

pub struct ResetOutcome {
    pub reset_happened: bool,
    pub new_consecutive_failures: u64,
}

/// Runs the periodic reset meeting. Does nothing unless the network has
/// stopped; if reset quorum is met, clears the failure counter so the
/// caller can reschedule a `BlockAttempt` at `now + block_time`.
pub fn run_reset_meeting(
    validators: &mut [Validator],
    rng: &mut SimRng,
    consecutive_failures: u64,
) -> ResetOutcome {
    resample_operator_presence(validators, rng);

    if !network_stopped(validators, consecutive_failures) {
        return ResetOutcome {
            reset_happened: false,
            new_consecutive_failures: consecutive_failures,
        };
    }

    if reset_quorum_met(validators) {
        ResetOutcome {
            reset_happened: true,
            new_consecutive_failures: 0,
        }
    } else {
        ResetOutcome {
            reset_happened: false,
            new_consecutive_failures: consecutive_failures,
        }
    }
}

pub struct AdjustOutcome {
    pub excluded: Vec<ValidatorId>,
    pub included_back: Vec<ValidatorId>,
}

/// Runs the adjust procedure: requires network-not-stopped and adjust
/// quorum. Evicts chronically failing included validators (subject to the
/// floor of 4 remaining included validators) and readmits every excluded
/// validator that is currently online.
pub fn run_adjust_meeting(
    validators: &mut [Validator],
    rng: &mut SimRng,
    consecutive_failures: u64,
) -> AdjustOutcome {
    resample_operator_presence(validators, rng);

    let mut outcome = AdjustOutcome {
        excluded: Vec::new(),
        included_back: Vec::new(),
    };

    if network_stopped(validators, consecutive_failures) || !adjust_quorum_met(validators) {
        return outcome;
    }

    apply_exclusion_policy(validators, &mut outcome.excluded);
    apply_inclusion_policy(validators, &mut outcome.included_back);

    outcome
}

/// Block-count-triggered variant of the adjust procedure: excludes any
/// included validator that did not propose a successfully-registered
/// block during the window, readmits recovered validators, and clears the
/// per-window flags.
pub fn run_block_triggered_adjust(
    validators: &mut [Validator],
    rng: &mut SimRng,
    consecutive_failures: u64,
) -> AdjustOutcome {
    resample_operator_presence(validators, rng);

    let mut outcome = AdjustOutcome {
        excluded: Vec::new(),
        included_back: Vec::new(),
    };

    if network_stopped(validators, consecutive_failures) || !adjust_quorum_met(validators) {
        for v in validators.iter_mut() {
            v.proposed_in_adjust_window = false;
        }
        return outcome;
    }

    let candidates: Vec<ValidatorId> = validators
        .iter()
        .filter(|v| v.included && !v.proposed_in_adjust_window)
        .map(|v| v.id)
        .collect();
    for id in candidates {
        let remaining = validators.iter().filter(|v| v.included).count();
        if remaining <= 4 {
            break;
        }
        if let Some(v) = validators.iter_mut().find(|v| v.id == id) {
            v.included = false;
            outcome.excluded.push(id);
        }
    }
    apply_inclusion_policy(validators, &mut outcome.included_back);

    for v in validators.iter_mut() {
        v.proposed_in_adjust_window = false;
    }

    outcome
}

fn apply_exclusion_policy(validators: &mut [Validator], excluded: &mut Vec<ValidatorId>) {
    let n = validators.iter().filter(|v| v.included).count();
    if n <= 4 {
        return;
    }
    let threshold = if n % 3 == 1 { 2 } else { 1 };
    let failing_count = validators
        .iter()
        .filter(|v| v.included && v.is_failing())
        .count();
    if failing_count < threshold {
        return;
    }
    // Exclude failing included validators one at a time, never dropping
    // below 4 included.
    let ids: Vec<ValidatorId> = validators
        .iter()
        .filter(|v| v.included && v.is_failing())
        .map(|v| v.id)
        .collect();
    for id in ids {
        let remaining = validators.iter().filter(|v| v.included).count();
        if remaining <= 4 {
            break;
        }
        if let Some(v) = validators.iter_mut().find(|v| v.id == id) {
            v.included = false;
            excluded.push(id);
        }
    }
}

fn apply_inclusion_policy(validators: &mut [Validator], included_back: &mut Vec<ValidatorId>) {
    for v in validators.iter_mut() {
        if !v.included && v.is_online() {
            v.included = true;
            included_back.push(v.id);
        }
    }
}
