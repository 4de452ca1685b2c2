use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use verlet_arena::{Simulation, SimulationConfig};

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("verlet_arena_frame");
    group.sample_size(20);

    // Collision solving is quadratic in the body count, so keep the sweep small.
    for n in [50usize, 200, 500] {
        let config = SimulationConfig {
            gravity_enabled: true,
            ..Default::default()
        };
        let mut sim = Simulation::new(config).expect("default config is valid");
        sim.scatter(n, 42);
        // Warmup, lets the initial overlaps settle
        for _ in 0..10 {
            let _ = sim.step(1.0 / 60.0);
        }

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| sim.step(1.0 / 60.0));
        });
    }

    group.finish();
}

fn bench_variable_frames(c: &mut Criterion) {
    let mut sim = Simulation::default();
    sim.scatter(200, 7);
    let frames = [1.0 / 60.0, 1.0 / 144.0, 1.0 / 30.0, 1.0 / 90.0];
    let mut next = 0;

    c.bench_function("variable_frame_time_200", |b| {
        b.iter(|| {
            next = (next + 1) % frames.len();
            sim.step(frames[next])
        });
    });
}

criterion_group!(benches, bench_frame, bench_variable_frames);
criterion_main!(benches);
