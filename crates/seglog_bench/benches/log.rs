//! Log benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seglog_bench::{populated_log, random_value, rotating_config};
use seglog_core::{read_frame, Log, LogConfig, Record};
use std::io::Read;
use tempfile::TempDir;

/// Benchmark appends without rotation.
fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_append");
    group.sample_size(50);

    for size in [64, 256, 1024].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let config = LogConfig::new()
                .max_store_bytes(u64::MAX)
                .max_index_bytes(64 << 20);
            let log = Log::open(temp_dir.path(), config).unwrap();
            let value = random_value(size);

            b.iter(|| {
                let offset = log.append(Record::new(black_box(value.clone()))).unwrap();
                black_box(offset);
            });
        });
    }

    group.finish();
}

/// Benchmark appends that rotate a segment every few records.
fn bench_append_rotating(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_append_rotating");
    group.sample_size(20);

    for per_segment in [8u64, 64, 512].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(per_segment),
            per_segment,
            |b, &per_segment| {
                let temp_dir = TempDir::new().unwrap();
                let log = Log::open(temp_dir.path(), rotating_config(per_segment, 128)).unwrap();
                let value = random_value(128);

                b.iter(|| {
                    let offset = log.append(Record::new(value.clone())).unwrap();
                    black_box(offset);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark reads spread across many segments.
fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_read");

    for segments in [1u64, 16, 256].iter() {
        group.bench_with_input(
            BenchmarkId::new("segments", segments),
            segments,
            |b, &segments| {
                let temp_dir = TempDir::new().unwrap();
                let count = 1024usize;
                let per_segment = (count as u64 / segments).max(1);
                let log = populated_log(temp_dir.path(), rotating_config(per_segment, 128), count, 128);

                let mut idx = 0u64;
                b.iter(|| {
                    let record = log.read(black_box((idx * 7) % count as u64)).unwrap();
                    idx += 1;
                    black_box(record);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a full raw export of the log.
fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_export");
    group.sample_size(20);

    let temp_dir = TempDir::new().unwrap();
    let log = populated_log(temp_dir.path(), rotating_config(64, 256), 4096, 256);
    let total: u64 = log.segments().iter().map(|s| s.store_bytes).sum();
    group.throughput(Throughput::Bytes(total));

    group.bench_function("read_to_end", |b| {
        b.iter(|| {
            let mut bytes = Vec::with_capacity(total as usize);
            log.reader().read_to_end(&mut bytes).unwrap();
            black_box(bytes);
        });
    });

    group.bench_function("frames", |b| {
        b.iter(|| {
            let mut reader = log.reader();
            let mut frames = 0usize;
            while let Some(frame) = read_frame(&mut reader).unwrap() {
                black_box(frame);
                frames += 1;
            }
            black_box(frames);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_append,
    bench_append_rotating,
    bench_read,
    bench_export,
);

criterion_main!(benches);
