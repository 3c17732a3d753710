//! Generator throughput benchmarks: raw draws and ranged draws.
//!
//! Run with: `cargo bench --bench generator`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use xorseq::Generator;

const DRAWS_PER_ITER: usize = 4_096;

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    group.sample_size(100);
    group.throughput(Throughput::Elements(DRAWS_PER_ITER as u64));

    group.bench_function("next_raw", |b| {
        b.iter_batched(
            || Generator::new(7),
            |mut rng| {
                for _ in 0..DRAWS_PER_ITER {
                    black_box(rng.next_raw());
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("fill_raw", |b| {
        let mut buf = vec![0_u32; DRAWS_PER_ITER];
        b.iter_batched(
            || Generator::new(7),
            |mut rng| {
                rng.fill_raw(&mut buf);
                black_box(&buf);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("ranged_value_1_100", |b| {
        b.iter_batched(
            || Generator::new(7),
            |mut rng| {
                for _ in 0..DRAWS_PER_ITER {
                    black_box(rng.ranged_value(black_box(1.0), black_box(100.0)));
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_generator);
criterion_main!(benches);
