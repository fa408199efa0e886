use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dropqc::filter::{filter_runs, FilterConfig};
use dropqc::record::{FieldSpec, ReplicateRecord, Run, RunCollection, Sample, Schema};
use dropqc::report::NullSink;
use dropqc::threshold::estimate_acceptance_interval;

/// Deterministic control values with a sprinkling of gross outliers
fn control_values(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            if i % 50 == 0 {
                5000.0 + i as f64
            } else {
                800.0 + ((i * 37) % 101) as f64
            }
        })
        .collect()
}

/// Create runs of 96 wells with a fixed number of droplets each
fn create_runs(num_runs: usize, droplets_per_sample: usize) -> RunCollection {
    let schema = Schema::new(vec![FieldSpec::number("green"), FieldSpec::number("red")]).unwrap();
    (0..num_runs)
        .map(|r| {
            let samples = (0..96)
                .map(|s| {
                    let records = control_values(droplets_per_sample)
                        .into_iter()
                        .map(|o| {
                            ReplicateRecord::new(o + s as f64)
                                .with_field("green", o * 0.3)
                                .with_field("red", o * 0.7)
                        })
                        .collect();
                    Sample::new(format!("well_{}", s), schema.clone(), records).unwrap()
                })
                .collect();
            Run::new(format!("plate_{}", r), samples).unwrap()
        })
        .collect()
}

/// Benchmark fence estimation on pooled values
fn bench_interval_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_estimation");

    for count in [100, 10_000, 100_000] {
        let values = control_values(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &values, |b, values| {
            b.iter(|| black_box(estimate_acceptance_interval(black_box(values))));
        });
    }

    group.finish();
}

/// Benchmark the batch driver end to end
fn bench_filter_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_runs");
    let config = FilterConfig::default();

    for droplets in [4, 32, 128] {
        let runs = create_runs(8, droplets);
        group.throughput(Throughput::Elements((8 * 96 * droplets) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}droplets", droplets)),
            &runs,
            |b, runs| {
                b.iter(|| {
                    let filtered = filter_runs(black_box(runs), &config, &mut NullSink).unwrap();
                    black_box(filtered);
                });
            },
        );
    }

    group.finish();
}

/// Compare sequential and parallel batches
#[cfg(feature = "parallel")]
fn bench_parallel_filter_runs(c: &mut Criterion) {
    use dropqc::filter::filter_runs_parallel;

    let mut group = c.benchmark_group("filter_runs_parallel");
    let config = FilterConfig::default();
    let runs = create_runs(32, 64);

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(filter_runs(&runs, &config, &mut NullSink).unwrap()));
    });
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(filter_runs_parallel(&runs, &config, &mut NullSink).unwrap()));
    });

    group.finish();
}

#[cfg(feature = "parallel")]
criterion_group!(
    benches,
    bench_interval_estimation,
    bench_filter_runs,
    bench_parallel_filter_runs
);

#[cfg(not(feature = "parallel"))]
criterion_group!(benches, bench_interval_estimation, bench_filter_runs);

criterion_main!(benches);
