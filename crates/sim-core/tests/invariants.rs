//! Property tests over randomized configs and seeds, generalizing the
//! quantified invariants from single-struct checks to whole-run checks.

use proptest::prelude::*;
use sim_core::Simulation;
use sim_types::{SimId, SimulationConfig};

fn arb_config() -> impl Strategy<Value = SimulationConfig> {
    (4u32..12, 1.0f64..3.0, 1.0f64..5.0, 1u64..6, 1u64..50).prop_map(
        |(num_validators, block_time, request_timeout, t_short, t_long)| SimulationConfig {
            num_simulations: 1,
            simulation_duration_days: 0.2,
            num_validators,
            block_time,
            request_timeout,
            t_fails_short_days: t_short as f64,
            t_fails_long_days: t_long as f64,
            mean_short_offline_minutes: 5.0,
            mean_long_offline_hours: 1.0,
            reset_meeting_interval_in_hours: 2.0,
            adjust_meeting_interval_in_hours: Some(4.0),
            adjust_procedure_interval_in_blocks: 0,
            adjust_procedure_call_failure_probability: 0.0,
            p_operator_absence: 0.1,
        },
    )
}

proptest! {
    #[test]
    fn clock_never_moves_backward(config in arb_config(), seed in any::<u64>()) {
        let output = Simulation::new(SimId(1), config.clone(), seed).run();
        prop_assert!(output.is_ok());
        let blocks = output.unwrap().blocks;
        for w in blocks.windows(2) {
            prop_assert!(w[1].timestamp >= w[0].timestamp);
        }
    }

    #[test]
    fn successful_blocks_respect_minimum_spacing(config in arb_config(), seed in any::<u64>()) {
        let block_time_floor = config.block_time.floor() as i64;
        let output = Simulation::new(SimId(1), config, seed).run().unwrap();
        for w in output.blocks.windows(2) {
            prop_assert!(w[1].timestamp - w[0].timestamp >= block_time_floor);
        }
    }

    #[test]
    fn same_seed_is_bit_reproducible(config in arb_config(), seed in any::<u64>()) {
        let a = Simulation::new(SimId(1), config.clone(), seed).run().unwrap();
        let b = Simulation::new(SimId(1), config, seed).run().unwrap();
        prop_assert_eq!(a.blocks.len(), b.blocks.len());
        for (x, y) in a.blocks.iter().zip(b.blocks.iter()) {
            prop_assert_eq!(x.timestamp, y.timestamp);
            prop_assert_eq!(x.proposer, y.proposer);
        }
    }
}
