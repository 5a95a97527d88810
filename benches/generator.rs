use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use linkrotator::generator::{LinkGenerator, SeededRandom, SystemClock, ThreadRandom};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let generator = LinkGenerator::new(
        "http://localhost:3000".to_string(),
        Arc::new(SystemClock),
        Arc::new(ThreadRandom),
    );

    c.bench_function("generate_link", |b| {
        b.iter(|| generator.generate(black_box("bench-project"), black_box("link_0_0")))
    });

    let seeded = LinkGenerator::new(
        "http://localhost:3000".to_string(),
        Arc::new(SystemClock),
        Arc::new(SeededRandom::new(42)),
    );

    c.bench_function("generate_link_seeded", |b| {
        b.iter(|| seeded.generate(black_box("bench-project"), black_box("link_0_0")))
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
