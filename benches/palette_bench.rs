//! Criterion benchmarks for palette cost evaluation and generation.
//!
//! Palettes are drawn from a fixed seed so every sample scores the same
//! colors.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_palette::color::{Color, DistanceMetric};
use u_palette::cost::{CostOptions, PaletteCost, Weights};
use u_palette::palette::{GeneratorConfig, PaletteGenerator};

fn random_palette(n: usize, seed: u64) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| Color::random(&mut rng)).collect()
}

// ===========================================================================
// Cost evaluation
// ===========================================================================

fn bench_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette_cost");

    for n in [5, 8, 16] {
        let palette = random_palette(n, 42);
        let targets = random_palette(n, 7);

        for metric in [DistanceMetric::Ciede2000, DistanceMetric::Cie76] {
            let cost = PaletteCost::new(Weights::default())
                .with_options(CostOptions::default().with_metric(metric))
                .with_targets(targets.clone());
            group.bench_with_input(
                BenchmarkId::new(format!("{metric:?}"), n),
                &palette,
                |b, p| b.iter(|| cost.evaluate(black_box(p))),
            );
        }
    }
    group.finish();
}

// ===========================================================================
// Full generation
// ===========================================================================

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(10);

    for n in [5, 8] {
        let config = GeneratorConfig::default()
            .with_palette_size(n)
            .with_schedule(1.0, 0.01, 0.01)
            .with_seed(42);
        let generator = PaletteGenerator::new(config);
        group.bench_with_input(BenchmarkId::from_parameter(n), &generator, |b, g| {
            b.iter(|| g.generate(black_box(None)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cost, bench_generate);
criterion_main!(benches);
