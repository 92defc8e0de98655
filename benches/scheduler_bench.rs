use criterion::{criterion_group, criterion_main, Criterion};
use school_scheduler::catalogue::Catalogue;
use school_scheduler::cost;
use school_scheduler::preprocessor;
use school_scheduler::search::find_best_solution;
use school_scheduler::solution::Solution;
use std::path::Path;

fn demo_catalogue() -> Catalogue {
    Catalogue::load(
        Path::new("demos/small_university"),
        Path::new("demos/small_university/app.config"),
    )
    .expect("bundled demo catalogue should load")
}

fn bench_preprocess(c: &mut Criterion) {
    let catalogue = demo_catalogue();
    c.bench_function("preprocess", |b| {
        b.iter(|| preprocessor::preprocess(&catalogue).unwrap());
    });
}

fn bench_cost_evaluate(c: &mut Criterion) {
    let catalogue = demo_catalogue();
    let preprocessed = preprocessor::preprocess(&catalogue).unwrap();
    let solution = Solution::new(&preprocessed);
    c.bench_function("cost_evaluate", |b| {
        b.iter(|| cost::evaluate(&solution, &catalogue, &preprocessed.conflicts));
    });
}

fn bench_search(c: &mut Criterion) {
    let catalogue = demo_catalogue();
    let preprocessed = preprocessor::preprocess(&catalogue).unwrap();
    c.bench_function("find_best_solution", |b| {
        b.iter(|| find_best_solution(&catalogue, &preprocessed).unwrap());
    });
}

criterion_group!(benches, bench_preprocess, bench_cost_evaluate, bench_search);
criterion_main!(benches);
