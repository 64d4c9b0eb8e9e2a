use criterion::{criterion_group, criterion_main, Criterion};
use movie_recommender::{Corpus, Index};

fn bench_build(c: &mut Criterion) {
    c.bench_function("index_build_sample", |b| {
        b.iter(|| Index::build(Corpus::sample()))
    });
}

fn bench_query(c: &mut Criterion) {
    let index = Index::build(Corpus::sample());
    c.bench_function("recommend_top5", |b| {
        b.iter(|| index.recommend("Inception", 5))
    });
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
