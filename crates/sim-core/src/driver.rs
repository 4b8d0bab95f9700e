//! The simulation driver: owns the event queue, the validator set, and the
//! RNG, and runs one simulation start-to-finish. Single-threaded and
//! CPU-bound by design - no `async`, no I/O handle, no shared state.

use sim_types::{BlockRecord, SimError, SimId, SimResult, SimulationConfig, ValidatorId};

use crate::events::{EventKind, EventQueue, FailureKind};
use crate::meetings::{run_adjust_meeting, run_block_triggered_adjust, run_reset_meeting};
use crate::quorum::{consensus_quorum_met, select_proposer};
use crate::rng::{floor_seconds, SimRng};
use crate::validator::Validator;

pub struct SimulationOutput {
    pub blocks: Vec<BlockRecord>,
}

pub struct Simulation {
    sim_id: SimId,
    config: SimulationConfig,
    clock: i64,
    duration: i64,
    validators: Vec<Validator>,
    queue: EventQueue,
    rng: SimRng,
    cursor: u64,
    consecutive_failures: u64,
    next_block_time: i64,
    adjust_window_count: u32,
}

impl Simulation {
    pub fn new(sim_id: SimId, config: SimulationConfig, seed: u64) -> Self {
        let n = config.num_validators as usize;
        let validators: Vec<Validator> = (0..n)
            .map(|i| Validator::new(ValidatorId(i as u32), 1.0 - config.p_operator_absence))
            .collect();
        let duration = config.simulation_duration_seconds();
        Self {
            sim_id,
            config,
            clock: 0,
            duration,
            validators,
            queue: EventQueue::new(),
            rng: SimRng::from_seed(seed),
            cursor: 0,
            consecutive_failures: 0,
            next_block_time: 0,
            adjust_window_count: 0,
        }
    }

    fn schedule_next_failure(&mut self, id: ValidatorId, now: i64) {
        let lambda_short = 1.0 / self.config.t_fails_short_seconds().max(f64::MIN_POSITIVE);
        let lambda_long = 1.0 / self.config.t_fails_long_seconds().max(f64::MIN_POSITIVE);
        let lambda_total = lambda_short + lambda_long;
        if lambda_total <= 0.0 {
            return;
        }
        let delay = self.rng.exponential(lambda_total);
        if !delay.is_finite() {
            return;
        }
        let kind = if self.rng.bernoulli(lambda_short / lambda_total) {
            FailureKind::Short
        } else {
            FailureKind::Long
        };
        let when = floor_seconds(now as f64 + delay);
        self.queue
            .schedule(when, EventKind::ValidatorFail { id, kind });
    }

    pub fn run(mut self) -> SimResult<SimulationOutput> {
        let mut blocks = Vec::new();

        for v in 0..self.validators.len() {
            let id = ValidatorId(v as u32);
            self.schedule_next_failure(id, 0);
        }
        self.queue
            .schedule(self.config.reset_meeting_interval_seconds(), EventKind::MeetingReset);
        if self.config.adjust_procedure_interval_in_blocks == 0 {
            self.queue.schedule(
                self.config.adjust_meeting_interval_seconds(),
                EventKind::MeetingAdjust,
            );
        }
        self.queue.schedule(0, EventKind::BlockAttempt);

        let progress_step = (self.duration / 100).max(1);
        self.queue.schedule(progress_step, EventKind::Progress);

        while let Some(event) = self.queue.pop() {
            if event.time > self.duration {
                break;
            }
            if event.time < self.clock {
                return Err(SimError::invariant(
                    event.time,
                    "popped event precedes simulation clock",
                ));
            }
            self.clock = event.time;

            match event.kind {
                EventKind::ValidatorFail { id, kind } => {
                    self.handle_validator_fail(id, kind);
                }
                EventKind::ValidatorRecover { id } => {
                    self.handle_validator_recover(id);
                }
                EventKind::BlockAttempt => {
                    if self.handle_block_attempt(&mut blocks)? {
                        break;
                    }
                }
                EventKind::MeetingReset => {
                    self.handle_meeting_reset();
                }
                EventKind::MeetingAdjust => {
                    self.handle_meeting_adjust();
                }
                EventKind::Progress => {
                    tracing::info!(
                        sim_id = self.sim_id.0,
                        clock = self.clock,
                        pct = 100 * self.clock / self.duration.max(1),
                        "progress"
                    );
                    self.queue
                        .schedule(self.clock + progress_step, EventKind::Progress);
                }
            }
        }

        Ok(SimulationOutput { blocks })
    }

    fn handle_validator_fail(&mut self, id: ValidatorId, kind: FailureKind) {
        let now = self.clock;
        let idx = id.index();
        if idx >= self.validators.len() || !self.validators[idx].is_online() {
            return;
        }
        if self.validators[idx].fail(now).is_err() {
            return;
        }
        let mean_offline = match kind {
            FailureKind::Short => self.config.mean_short_offline_seconds(),
            FailureKind::Long => self.config.mean_long_offline_seconds(),
        };
        let rate = if mean_offline > 0.0 {
            1.0 / mean_offline
        } else {
            0.0
        };
        let duration = self.rng.exponential(rate);
        let recover_at = if duration.is_finite() {
            floor_seconds(now as f64 + duration)
        } else {
            self.duration + 1
        };
        self.queue
            .schedule(recover_at, EventKind::ValidatorRecover { id });
    }

    fn handle_validator_recover(&mut self, id: ValidatorId) {
        let now = self.clock;
        let idx = id.index();
        if idx >= self.validators.len() || !self.validators[idx].is_failing() {
            return;
        }
        if self.validators[idx].recover(now).is_err() {
            return;
        }
        self.schedule_next_failure(id, now);
    }

    /// Returns `Ok(true)` when the simulation should terminate early
    /// (no validators remain included).
    fn handle_block_attempt(&mut self, blocks: &mut Vec<BlockRecord>) -> SimResult<bool> {
        let now = self.clock;
        if now != self.next_block_time {
            return Ok(false);
        }

        let proposer = match select_proposer(&self.validators, self.cursor) {
            Some(id) => id,
            None => return Ok(true),
        };

        let quorum_met = consensus_quorum_met(&self.validators);
        let proposer_online = self.validators[proposer.index()].is_online();

        if quorum_met && proposer_online {
            blocks.push(BlockRecord {
                sim_id: self.sim_id,
                timestamp: now,
                proposer,
            });
            self.validators[proposer.index()].blocks_proposed += 1;
            self.consecutive_failures = 0;
            self.next_block_time = now + floor_seconds(self.config.block_time);

            let online_included = self
                .validators
                .iter()
                .filter(|v| v.included && v.is_online())
                .count() as i32;
            let register_fail_prob = self
                .config
                .adjust_procedure_call_failure_probability
                .powi(online_included);
            let registered = !self.rng.bernoulli(register_fail_prob);
            if registered {
                self.validators[proposer.index()].proposed_in_adjust_window = true;
                if self.config.adjust_procedure_interval_in_blocks > 0 {
                    self.adjust_window_count += 1;
                    if self.adjust_window_count >= self.config.adjust_procedure_interval_in_blocks
                    {
                        self.run_block_triggered_adjust();
                        self.adjust_window_count = 0;
                    }
                }
            }
        } else {
            self.consecutive_failures += 1;
            let penalty = 2f64.powi((self.consecutive_failures - 1) as i32) * self.config.request_timeout;
            self.next_block_time = now + floor_seconds(penalty);
        }

        self.cursor += 1;
        self.queue
            .schedule(self.next_block_time, EventKind::BlockAttempt);
        Ok(false)
    }

    fn handle_meeting_reset(&mut self) {
        let outcome = run_reset_meeting(&mut self.validators, &mut self.rng, self.consecutive_failures);
        self.consecutive_failures = outcome.new_consecutive_failures;
        if outcome.reset_happened {
            tracing::debug!(sim_id = self.sim_id.0, clock = self.clock, "reset meeting succeeded");
            self.next_block_time = self.clock + floor_seconds(self.config.block_time);
            self.queue
                .schedule(self.next_block_time, EventKind::BlockAttempt);
        }
        self.queue.schedule(
            self.clock + self.config.reset_meeting_interval_seconds(),
            EventKind::MeetingReset,
        );
    }

    fn handle_meeting_adjust(&mut self) {
        let _outcome = run_adjust_meeting(&mut self.validators, &mut self.rng, self.consecutive_failures);
        tracing::debug!(sim_id = self.sim_id.0, clock = self.clock, "adjust meeting ran");
        self.queue.schedule(
            self.clock + self.config.adjust_meeting_interval_seconds(),
            EventKind::MeetingAdjust,
        );
    }

    fn run_block_triggered_adjust(&mut self) {
        let _outcome =
            run_block_triggered_adjust(&mut self.validators, &mut self.rng, self.consecutive_failures);
        tracing::debug!(
            sim_id = self.sim_id.0,
            clock = self.clock,
            "block-triggered adjust ran"
        );
    }
}
