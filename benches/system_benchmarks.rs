use criterion::{criterion_group, criterion_main, Criterion};
use serial_sysmon::{
    metrics::data::{CpuUsage, DiskUsage, MemoryUsage, MetricsSnapshot},
    SystemCollector,
};

fn bench_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        timestamp: 1234567890,
        cpu: CpuUsage {
            per_core: vec![12.5, 37.0, 99.9, 0.1],
        },
        memory: MemoryUsage {
            ram_percent: 48.2,
            swap_percent: 3.1,
        },
        disks: DiskUsage {
            home_percent: 71.4,
            root_percent: 39.8,
        },
    }
}

/// Benchmark wire-frame encoding
fn bench_frame_encoding(c: &mut Criterion) {
    let snapshot = bench_snapshot();

    c.bench_function("frame_encoding", |b| b.iter(|| snapshot.encode_frame()));
}

/// Benchmark JSON serialization of snapshots
fn bench_json_serialization(c: &mut Criterion) {
    let snapshot = bench_snapshot();

    c.bench_function("json_serialization", |b| {
        b.iter(|| serde_json::to_string(&snapshot).expect("Should serialize"))
    });
}

/// Benchmark JSON deserialization
fn bench_json_deserialization(c: &mut Criterion) {
    let json_string = serde_json::to_string(&bench_snapshot()).expect("Should serialize");

    c.bench_function("json_deserialization", |b| {
        b.iter(|| serde_json::from_str::<MetricsSnapshot>(&json_string).expect("Should deserialize"))
    });
}

/// Benchmark snapshot cloning
fn bench_snapshot_clone(c: &mut Criterion) {
    let snapshot = bench_snapshot();

    c.bench_function("snapshot_clone", |b| b.iter(|| snapshot.clone()));
}

/// Benchmark system collector initialization
fn bench_collector_init(c: &mut Criterion) {
    c.bench_function("collector_initialization", |b| {
        b.iter(|| SystemCollector::new().expect("Should create collector"))
    });
}

criterion_group!(
    benches,
    bench_frame_encoding,
    bench_json_serialization,
    bench_json_deserialization,
    bench_snapshot_clone,
    bench_collector_init
);

criterion_main!(benches);
