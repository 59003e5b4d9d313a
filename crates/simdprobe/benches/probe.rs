//! Probe cost benchmarks.
//!
//! Run: `cargo bench -p simdprobe`
//!
//! Nothing is cached, so each iteration re-issues the probe instructions
//! (CPUID is serializing and typically costs 100+ cycles; under a hypervisor
//! it traps and costs far more). Callers should probe once and keep the result.

use core::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use simdprobe::{Extension, Extensions};

fn bench_queries(c: &mut Criterion) {
  let mut group = c.benchmark_group("probe/query");
  eprintln!("extensions: {}", Extensions::probe());

  group.bench_function("avx", |b| b.iter(|| black_box(simdprobe::has_avx())));
  group.bench_function("avx512", |b| b.iter(|| black_box(simdprobe::has_avx512())));
  group.bench_function("neon", |b| b.iter(|| black_box(simdprobe::has_neon())));

  group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
  let mut group = c.benchmark_group("probe/snapshot");

  group.bench_function("probe_all", |b| b.iter(|| black_box(Extensions::probe())));
  group.bench_function("explain", |b| {
    b.iter(|| Extension::ALL.map(|ext| simdprobe::explain(black_box(ext))));
  });

  group.finish();
}

criterion_group!(benches, bench_queries, bench_snapshot);
criterion_main!(benches);
