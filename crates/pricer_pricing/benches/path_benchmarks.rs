//! Criterion benchmarks for GBM path simulation.
//!
//! Benchmarks cover:
//! - Full path matrix generation for typical request sizes
//! - Stepped versus exact terminal sampling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_pricing::mc::{GbmParams, PathSimulator, SimulationConfig, TerminalSampling};

fn simulator(n_paths: usize, n_steps: usize, sampling: TerminalSampling) -> PathSimulator {
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .seed(42)
        .sampling(sampling)
        .build()
        .unwrap();
    PathSimulator::new(config)
}

fn bench_path_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_matrix");
    let params = GbmParams::new(100.0, 0.03, 0.25, 1.0);

    for (n_paths, n_steps) in [(1_000, 252), (10_000, 52), (10_000, 252)] {
        let label = format!("{}paths_{}steps", n_paths, n_steps);
        let sim = simulator(n_paths, n_steps, TerminalSampling::Stepped);

        group.bench_with_input(BenchmarkId::from_parameter(&label), &sim, |b, sim| {
            b.iter(|| sim.simulate_paths(black_box(&params)));
        });
    }

    group.finish();
}

fn bench_terminal_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal_sampling");
    let params = GbmParams::new(100.0, 0.03, 0.25, 1.0);

    for sampling in [TerminalSampling::Stepped, TerminalSampling::Exact] {
        let sim = simulator(10_000, 252, sampling);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", sampling)),
            &sim,
            |b, sim| {
                b.iter(|| sim.simulate_terminal(black_box(&params)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_path_matrix, bench_terminal_sampling);
criterion_main!(benches);
