//! Pure BFT quorum arithmetic and proposer selection over a validator
//! slice. Free functions, not methods on a calculator struct: none of them
//! own configuration, so there is nothing to wrap state around.

use sim_types::ValidatorId;

use crate::validator::Validator;

fn included(validators: &[Validator]) -> impl Iterator<Item = &Validator> {
    validators.iter().filter(|v| v.included)
}

/// Strictly more than 2/3 of included validators online. False with zero
/// included validators.
pub fn consensus_quorum_met(validators: &[Validator]) -> bool {
    let included: Vec<&Validator> = included(validators).collect();
    if included.is_empty() {
        return false;
    }
    let online = included.iter().filter(|v| v.is_online()).count();
    online * 3 > included.len() * 2
}

/// No validators included, or the consecutive-failure counter has reached
/// a third of the included set. Compared as `cf * 3 >= count` rather than
/// `cf >= count / 3`: integer division on the right-hand side truncates
/// the threshold and trips the predicate too early whenever `count` isn't
/// a multiple of 3.
pub fn network_stopped(validators: &[Validator], consecutive_failures: u64) -> bool {
    let count = included(validators).count();
    count == 0 || consecutive_failures as usize * 3 >= count
}

/// Strictly more than 2/3 of included validators are online and their
/// operator is present.
pub fn reset_quorum_met(validators: &[Validator]) -> bool {
    let included: Vec<&Validator> = included(validators).collect();
    if included.is_empty() {
        return false;
    }
    let ready = included
        .iter()
        .filter(|v| v.is_online() && v.operator_present)
        .count();
    ready * 3 > included.len() * 2
}

/// Strictly more than 1/2 of included validators are online and their
/// operator is present.
pub fn adjust_quorum_met(validators: &[Validator]) -> bool {
    let included: Vec<&Validator> = included(validators).collect();
    if included.is_empty() {
        return false;
    }
    let ready = included
        .iter()
        .filter(|v| v.is_online() && v.operator_present)
        .count();
    ready * 2 > included.len()
}

/// Sorted-by-identity view of the included set, used both for proposer
/// selection and by the meeting protocols.
pub fn included_sorted(validators: &[Validator]) -> Vec<ValidatorId> {
    let mut ids: Vec<ValidatorId> = included(validators).map(|v| v.id).collect();
    ids.sort();
    ids
}

/// `cursor mod |included|`. Caller advances the cursor by one after every
/// attempt regardless of outcome.
pub fn select_proposer(validators: &[Validator], cursor: u64) -> Option<ValidatorId> {
    let ids = included_sorted(validators);
    if ids.is_empty() {
        return None;
    }
    Some(ids[(cursor as usize) % ids.len()])
}
