use criterion::{criterion_group, criterion_main, Criterion};
use sim_core::Simulation;
use sim_types::{SimId, SimulationConfig};

fn one_month_run(c: &mut Criterion) {
    let config = SimulationConfig {
        num_simulations: 1,
        simulation_duration_days: 30.0,
        num_validators: 20,
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
    };

    c.bench_function("simulation_one_month_20_validators", |b| {
        b.iter(|| {
            let sim = Simulation::new(SimId(1), config.clone(), 42);
            sim.run().unwrap()
        });
    });
}

criterion_group!(benches, one_month_run);
criterion_main!(benches);
