use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hexchess::board::state::State;
use hexchess::move_generation::generate;
use hexchess::search::alpha_beta::iterative_deepen;
use hexchess::search::board_scoring::MaterialScorer;
use hexchess::search::node::Node;

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));

    for (name, state) in [
        ("glinski_start", State::glinski()),
        ("mccooey_start", State::mccooey()),
        ("hexofen_start", State::hexofen()),
    ] {
        // Correctness guard before benchmarking.
        assert!(!generate(&state).is_empty());
        group.bench_function(name, |b| {
            b.iter(|| black_box(generate(black_box(&state))).len())
        });
    }

    group.finish();
}

fn bench_make_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_undo");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));

    let state = State::glinski();
    let moves = generate(&state);
    group.bench_function("glinski_round_trip", |b| {
        let mut state = state.clone();
        b.iter(|| {
            for mv in &moves {
                let undo = state.make_move(mv);
                state.undo_move(mv, &undo);
            }
            black_box(state.hash())
        })
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(20);

    for budget in [500u64, 2_000] {
        group.bench_function(format!("glinski_budget_{budget}"), |b| {
            b.iter(|| {
                let mut root = Node::new(State::glinski());
                iterative_deepen(&mut root, &MaterialScorer, black_box(budget), || false);
                black_box(root.best_move)
            })
        });
    }

    group.finish();
}

criterion_group!(engine_benches, bench_movegen, bench_make_undo, bench_search);
criterion_main!(engine_benches);
