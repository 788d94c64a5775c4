//! Benchmark for bone-weight computation.
//!
//! TARGET: a high-tier proxy mesh skinned well inside a generation request
//!
//! Run with: cargo bench --package grimoire_rig --bench skinning_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grimoire_rig::{BoneWeightCalculator, SkeletonGenerator};
use grimoire_shared::{CharacterFeatures, CharacterType, Vec3};

fn vertex_cloud(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            Vec3::new((t * 37.0).sin() * 0.4, t * 1.8, (t * 53.0).cos() * 0.3)
        })
        .collect()
}

fn benchmark_skinning_workers(c: &mut Criterion) {
    let features = CharacterFeatures {
        has_tail: true,
        has_wings: true,
        ..CharacterFeatures::default()
    };
    let skeleton = SkeletonGenerator::new().generate(CharacterType::Humanoid, &features, 1.8);
    let positions = vertex_cloud(40_000);

    let mut group = c.benchmark_group("skinning");
    group.throughput(Throughput::Elements(positions.len() as u64));
    group.sample_size(20);

    for workers in [1, 2, 4, 8] {
        let calculator = BoneWeightCalculator::new(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| black_box(calculator.compute(&skeleton, black_box(&positions))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_skinning_workers);
criterion_main!(benches);
