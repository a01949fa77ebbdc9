use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use tag_cloud_core::prelude::*;
use tag_cloud_core::sizes;

fn generate_sizes(count: usize, min: (i32, i32), max: (i32, i32)) -> Vec<Size> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| Size::new(rng.gen_range(min.0..=max.0), rng.gen_range(min.1..=max.1)))
        .collect()
}

fn bench_random_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_sizes");
    group.sample_size(10);

    for count in [100, 1_000, 10_000] {
        let input = generate_sizes(count, (10, 10), (50, 30));
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("compacted", count), &input, |b, input| {
            b.iter(|| {
                let mut cloud = CircularCloudLayouter::new(Point::new(0, 0));
                for s in input {
                    let _ = cloud.put_next_rectangle(*s);
                }
                black_box(cloud)
            });
        });

        group.bench_with_input(BenchmarkId::new("spiral_only", count), &input, |b, input| {
            b.iter(|| {
                let cfg = CloudConfig::builder().compaction(false).build();
                let mut cloud = CircularCloudLayouter::with_config(Point::new(0, 0), cfg)
                    .expect("valid config");
                for s in input {
                    let _ = cloud.put_next_rectangle(*s);
                }
                black_box(cloud)
            });
        });
    }

    group.finish();
}

fn bench_cell_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_size");
    group.sample_size(10);
    let input = generate_sizes(5_000, (10, 10), (50, 30));

    for cell in [16u32, 32, 64, 128, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(cell), &input, |b, input| {
            b.iter(|| {
                let cfg = CloudConfig::builder().cell_size(cell).build();
                let mut cloud = CircularCloudLayouter::with_config(Point::new(0, 0), cfg)
                    .expect("valid config");
                for s in input {
                    let _ = cloud.put_next_rectangle(*s);
                }
                black_box(cloud)
            });
        });
    }

    group.finish();
}

fn bench_decreasing(c: &mut Criterion) {
    c.bench_function("slow_decreasing", |b| {
        b.iter(|| {
            let mut cloud = CircularCloudLayouter::new(Point::new(0, 0));
            let placed = cloud.put_next_rectangles(sizes::slow_decreasing()).count();
            black_box(placed)
        });
    });
}

fn bench_spiral(c: &mut Criterion) {
    c.bench_function("spiral_10k_points", |b| {
        b.iter(|| black_box(Spiral::new(Point::new(0, 0)).take(10_000).last()));
    });
}

criterion_group!(
    benches,
    bench_random_sizes,
    bench_cell_size,
    bench_decreasing,
    bench_spiral,
);
criterion_main!(benches);
