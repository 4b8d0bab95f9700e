use criterion::{criterion_group, criterion_main, Criterion};
use sim_core::{EventKind, EventQueue};

fn push_pop_throughput(c: &mut Criterion) {
    c.bench_function("event_queue_push_pop_10k", |b| {
        b.iter(|| {
            let mut queue = EventQueue::new();
            for t in 0..10_000i64 {
                queue.schedule(10_000 - t, EventKind::Progress);
            }
            while queue.pop().is_some() {}
        });
    });
}

criterion_group!(benches, push_pop_throughput);
criterion_main!(benches);
