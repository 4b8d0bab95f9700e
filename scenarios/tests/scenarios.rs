use sim_analytics::{EfficiencyMode, MonthlyAnalyzer, Reservoir};
use sim_core::Simulation;
use sim_types::{SimId, SimulationConfig};

fn base_config() -> SimulationConfig {
    SimulationConfig {
        num_simulations: 1,
        simulation_duration_days: 1.0,
        num_validators: 10,
        block_time: 5.0,
        request_timeout: 2.0,
        t_fails_short_days: 0.0,
        t_fails_long_days: 0.0,
        mean_short_offline_minutes: 5.0,
        mean_long_offline_hours: 12.0,
        reset_meeting_interval_in_hours: 24.0,
        adjust_meeting_interval_in_hours: None,
        adjust_procedure_interval_in_blocks: 0,
        adjust_procedure_call_failure_probability: 0.0,
        p_operator_absence: 0.0,
    }
}

/// S1. Happy path: 10 validators, 1 day, block_time=5s, no failures.
#[test]
fn s1_happy_path_produces_expected_block_count() {
    let config = base_config();
    let output = Simulation::new(SimId(1), config, 1).run().unwrap();
    assert_eq!(output.blocks.len(), 17281);
    assert!(output.blocks.windows(2).all(|w| w[1].timestamp - w[0].timestamp == 5));
}

/// S3. Quorum loss and reset: 4 validators, 3 fail simultaneously so
/// consensus quorum (1/4 online) is lost; the network-stopped predicate
/// fires, and the reset meeting clears the stall once operators attend.
#[test]
fn s3_quorum_loss_recovers_after_reset_meeting() {
    use sim_core::meetings::run_reset_meeting;
    use sim_core::quorum::{consensus_quorum_met, network_stopped};
    use sim_core::{SimRng, Validator};
    use sim_types::ValidatorId;

    let mut validators: Vec<Validator> = (0..4)
        .map(|i| Validator::new(ValidatorId(i), 1.0))
        .collect();
    validators[1].fail(10).unwrap();
    validators[2].fail(10).unwrap();
    validators[3].fail(10).unwrap();

    assert!(!consensus_quorum_met(&validators));
    assert!(network_stopped(&validators, 2));

    let mut rng = SimRng::from_seed(1);
    let outcome = run_reset_meeting(&mut validators, &mut rng, 2);
    // Reset quorum needs > 2/3 online AND present; with only 1 of 4
    // validators online, attendance alone cannot clear the stall.
    assert!(!outcome.reset_happened);
    assert_eq!(outcome.new_consecutive_failures, 2);

    // Once enough validators recover, the same meeting clears the stall.
    validators[1].recover(50).unwrap();
    validators[2].recover(50).unwrap();
    let outcome = run_reset_meeting(&mut validators, &mut rng, 2);
    assert!(outcome.reset_happened);
    assert_eq!(outcome.new_consecutive_failures, 0);
}

/// S4 (negative case). 7 validators, one persistently failing: 7 % 3 == 1
/// means the exclusion threshold is 2, so a single failing validator is
/// never evicted.
#[test]
fn s4_seven_validators_single_failure_never_excluded() {
    use sim_core::meetings::run_adjust_meeting;
    use sim_core::{SimRng, Validator};
    use sim_types::ValidatorId;

    let mut validators: Vec<Validator> = (0..7)
        .map(|i| Validator::new(ValidatorId(i), 1.0))
        .collect();
    validators[6].fail(0).unwrap();

    let mut rng = SimRng::from_seed(1);
    let outcome = run_adjust_meeting(&mut validators, &mut rng, 0);
    assert!(outcome.excluded.is_empty());
}

/// S4 (positive case). 8 validators, two persistently failing: 8 % 3 == 2
/// means the exclusion threshold is 1, so both are evicted.
#[test]
fn s4_eight_validators_two_failures_both_excluded() {
    use sim_core::meetings::run_adjust_meeting;
    use sim_core::{SimRng, Validator};
    use sim_types::ValidatorId;

    let mut validators: Vec<Validator> = (0..8)
        .map(|i| Validator::new(ValidatorId(i), 1.0))
        .collect();
    validators[6].fail(0).unwrap();
    validators[7].fail(0).unwrap();

    let mut rng = SimRng::from_seed(1);
    let outcome = run_adjust_meeting(&mut validators, &mut rng, 0);
    assert_eq!(outcome.excluded.len(), 2);
}

/// S5. Monthly analyzer: a cross-month interval is discarded, and
/// same-month efficiency reflects full coverage.
#[test]
fn s5_monthly_analyzer_discards_cross_month_interval() {
    use sim_types::{BlockRecord, ValidatorId};

    let mut analyzer = MonthlyAnalyzer::new(5.0, EfficiencyMode::SpanBased);
    let rec = |ts: i64| BlockRecord {
        sim_id: SimId(1),
        timestamp: ts,
        proposer: ValidatorId(0),
    };
    analyzer.record(&rec(0));
    analyzer.record(&rec(10));
    analyzer.record(&rec(2_592_005));

    let rows = analyzer.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].efficiency, 100.0);
}

/// S6. Reservoir quantile: feeding 1..=10000 with capacity 10000 should
/// yield the exact P99 (within the reservoir's interpolation scheme).
#[test]
fn s6_reservoir_p99_matches_exact_quantile_at_full_capacity() {
    let mut reservoir = Reservoir::new(10_000, 1);
    for i in 1..=10_000u64 {
        reservoir.add(i as f64);
    }
    let p99 = reservoir.quantile(99.0);
    // rank = 0.99*(10000-1) = 9899.01 -> interpolates sorted[9899]=9900 and
    // sorted[9900]=9901, giving exactly 9900.01 - within spec S6's "~9901 (+-1)".
    assert!((p99 - 9900.01).abs() < 1e-9, "p99 was {p99}");
}

/// Determinism: same seed and config produce a bit-identical block stream.
#[test]
fn determinism_across_repeated_runs() {
    let config = base_config();
    let a = Simulation::new(SimId(1), config.clone(), 99).run().unwrap();
    let b = Simulation::new(SimId(1), config, 99).run().unwrap();
    assert_eq!(a.blocks.len(), b.blocks.len());
    for (x, y) in a.blocks.iter().zip(b.blocks.iter()) {
        assert_eq!(x.timestamp, y.timestamp);
        assert_eq!(x.proposer, y.proposer);
    }
}
