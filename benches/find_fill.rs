use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fillcsp::backtracking_search::{find_fill, FillConfig};
use fillcsp::grid::{generate_problem, Grid};
use fillcsp::heuristics::ValueOrderingKind;
use fillcsp::word_list::small_word_list;
use std::collections::HashMap;

pub fn criterion_benchmark(c: &mut Criterion) {
    let problem = generate_problem(
        &Grid::small(),
        &small_word_list(),
        &["2across".to_string()],
        &HashMap::new(),
    )
    .unwrap();

    c.bench_function("fill small grid", |b| {
        b.iter(|| find_fill(black_box(&problem), &FillConfig::default()).unwrap())
    });

    let composite = FillConfig {
        value_ordering: ValueOrderingKind::Composite,
        ..FillConfig::default()
    };
    c.bench_function("fill small grid (composite)", |b| {
        b.iter(|| find_fill(black_box(&problem), &composite).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
