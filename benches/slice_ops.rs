use std::{hint::black_box, time::Duration};

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{RngExt, SeedableRng, rngs::StdRng};
use sugared::Slice;

fn slice_ops(criterion: &mut Criterion) {
    let seed = 0;
    let mut rng = StdRng::seed_from_u64(seed);

    let nums: Slice<i32> = std::iter::repeat_with(|| rng.random_range(-10_000..=10_000))
        .take(500_000)
        .collect();

    println!("Seed: {seed}");
    println!("First 10 elements: {:?}", &nums[..10]);

    let mut group = criterion.benchmark_group("slice_ops");

    group.bench_function("filter_map_reduce", |bencher| {
        bencher.iter(|| black_box(filter_map_reduce(&nums)));
    });

    group.bench_function("std_iter", |bencher| {
        bencher.iter(|| black_box(std_iter(&nums)));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(10));
    targets = slice_ops
}
criterion_main!(benches);

fn filter_map_reduce(nums: &Slice<i32>) -> Option<i64> {
    nums.filter(|num| num % 2 == 0)
        .map(|&num| i64::from(num))
        .reduce(|a, b| a + b)
}

fn std_iter(nums: &[i32]) -> Option<i64> {
    nums.iter()
        .filter(|num| *num % 2 == 0)
        .map(|&num| i64::from(num))
        .reduce(|a, b| a + b)
}
