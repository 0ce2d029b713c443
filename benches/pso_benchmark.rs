use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use myrmex::algorithms::particles::Topology;
use myrmex::algorithms::ParticleSwarm;
use myrmex::core::Engine;
use myrmex::test_functions::Rastrigin;

fn pso_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("PSO");
    for n in [2, 3, 5] {
        group.bench_with_input(BenchmarkId::new("Rastrigin", n), &n, |b, ndim| {
            let pso = ParticleSwarm::new(*ndim)
                .with_bound(-5.12, 5.12)
                .with_n_particles(30)
                .with_max_epochs(100)
                .with_seed(0);
            let mut engine = Engine::new(pso);
            b.iter(|| {
                engine.minimize(&Rastrigin).unwrap();
                black_box(&engine.result);
            });
        });
    }
    for topology in [Topology::Global, Topology::Local, Topology::Focal] {
        group.bench_with_input(
            BenchmarkId::new("Topology", format!("{topology:?}")),
            &topology,
            |b, &topology| {
                let pso = ParticleSwarm::new(3)
                    .with_bound(-5.12, 5.12)
                    .with_n_particles(30)
                    .with_max_epochs(100)
                    .with_topology(topology)
                    .with_seed(0);
                let mut engine = Engine::new(pso);
                b.iter(|| {
                    engine.minimize(&Rastrigin).unwrap();
                    black_box(&engine.result);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, pso_benchmark);
criterion_main!(benches);
