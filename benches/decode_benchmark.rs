//! Benchmarks for binary cookie decoding.
//!
//! Run with: cargo bench
//!
//! This benchmark suite measures:
//! - Decode throughput (bytes and records per second)
//! - Scalability with page and record counts
//! - Export cost on top of decoding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use binarycookies::{Container, DecoderConfig, ExportFormat, TimeZone};

/// Encode one cookie record.
fn encode_record(i: usize) -> Vec<u8> {
    let fields = [
        format!(".domain{}.example.com", i),
        format!("cookie_{}", i),
        "/".to_string(),
        format!("value-{:08x}", i.wrapping_mul(2654435761)),
    ];
    let mut strings = Vec::new();
    let mut offsets = Vec::new();
    for field in &fields {
        offsets.push((56 + strings.len()) as u32);
        strings.extend_from_slice(field.as_bytes());
        strings.push(0);
    }

    let mut out = Vec::new();
    out.extend_from_slice(&((56 + strings.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&((i % 4) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    for offset in offsets {
        out.extend_from_slice(&offset.to_le_bytes());
    }
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(&(700_000_000.0 + i as f64).to_le_bytes());
    out.extend_from_slice(&(650_000_000.0 + i as f64).to_le_bytes());
    out.extend_from_slice(&strings);
    out
}

/// Generate a container with `pages` pages of `per_page` records.
fn generate_container(pages: usize, per_page: usize) -> Vec<u8> {
    let mut bodies = Vec::with_capacity(pages);
    for p in 0..pages {
        let records: Vec<_> = (0..per_page).map(|i| encode_record(p * per_page + i)).collect();
        let mut next = 8 + per_page * 4 + 4;
        let mut body = Vec::new();
        body.extend_from_slice(&256u32.to_be_bytes());
        body.extend_from_slice(&(per_page as u32).to_le_bytes());
        for r in &records {
            body.extend_from_slice(&(next as u32).to_le_bytes());
            next += r.len();
        }
        body.extend_from_slice(&[0u8; 4]);
        for r in &records {
            body.extend_from_slice(r);
        }
        bodies.push(body);
    }

    let mut out = b"cook".to_vec();
    out.extend_from_slice(&(pages as u32).to_be_bytes());
    for body in &bodies {
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    }
    for body in &bodies {
        out.extend_from_slice(body);
    }
    out
}

fn config() -> DecoderConfig {
    DecoderConfig::new().with_time_zone(TimeZone::Utc)
}

/// Benchmark: decode a typical browser-sized file
fn bench_decode(c: &mut Criterion) {
    let data = generate_container(10, 50);
    let config = config();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("500_records", |b| {
        b.iter(|| Container::from_bytes(black_box(&data), &config).unwrap());
    });

    group.finish();
}

/// Benchmark: scalability with record count
fn bench_scalability(c: &mut Criterion) {
    let config = config();
    let mut group = c.benchmark_group("scalability");

    for size in [10usize, 100, 1_000, 10_000].iter() {
        let data = generate_container((*size / 100).max(1), (*size).min(100));
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("records", size), &data, |b, data| {
            b.iter(|| Container::from_bytes(black_box(data), &config).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: CSV export of a decoded container
fn bench_export(c: &mut Criterion) {
    let container = Container::from_bytes(&generate_container(10, 100), &config()).unwrap();

    let mut group = c.benchmark_group("export");
    group.throughput(Throughput::Elements(container.record_count() as u64));

    group.bench_function("csv_1k_rows", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(256 * 1024);
            ExportFormat::Csv.write(&mut out, black_box(&container)).unwrap();
            out
        });
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_scalability, bench_export);
criterion_main!(benches);
