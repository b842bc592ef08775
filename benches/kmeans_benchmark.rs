use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kmeans_stepper::{InitMethod, KMeans, KMeansConfig};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use std::time::Duration;

fn benchmark_fit_varying_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_points");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let k = 5;
    let point_counts = [300, 3_000, 30_000];

    for n_points in point_counts.iter() {
        group.throughput(Throughput::Elements(*n_points as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_points),
            n_points,
            |b, &n_points| {
                let points = Array2::random((n_points, 2), Uniform::new(-10.0, 10.0));
                let config = KMeansConfig::new(k).with_seed(42);
                let kmeans = KMeans::new(points, config).unwrap();

                b.iter(|| {
                    let mut kmeans = kmeans.clone();
                    kmeans.fit(black_box(10)).unwrap()
                });
            },
        );
    }
    group.finish();
}

fn benchmark_initialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialization");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_points = 5_000;
    let k = 20;
    let points = Array2::random((n_points, 2), Uniform::new(-10.0, 10.0));

    for method in [InitMethod::Random, InitMethod::Farthest, InitMethod::KMeansPlusPlus] {
        group.bench_function(method.name(), |b| {
            let config = KMeansConfig::new(k).with_init(method.clone()).with_seed(42);

            b.iter(|| KMeans::new(black_box(points.clone()), config.clone()).unwrap());
        });
    }
    group.finish();
}

fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let points = Array2::random((3_000, 2), Uniform::new(-10.0, 10.0));
    let mut kmeans = KMeans::new(points, KMeansConfig::new(8).with_seed(42)).unwrap();
    kmeans.fit(50).unwrap();

    let queries = Array2::random((10_000, 2), Uniform::new(-10.0, 10.0));
    group.throughput(Throughput::Elements(queries.nrows() as u64));
    group.bench_function("10k_points", |b| {
        b.iter(|| kmeans.predict_many(black_box(&queries.view())).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_fit_varying_points,
    benchmark_initialization,
    benchmark_predict,
);
criterion_main!(benches);
