//! Game throughput benchmarks: full games and full rounds.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rust_ballgame::league::fixtures;
use rust_ballgame::{GameRng, MatchEngine};

fn bench_game(c: &mut Criterion) {
    let engine = MatchEngine::default();
    let league = fixtures::demo_league();
    let game = fixtures::demo_game(1);

    let mut group = c.benchmark_group("game");
    group.throughput(Throughput::Elements(1));

    let mut seed = 0u64;
    group.bench_function("play_game", |b| {
        b.iter(|| {
            seed += 1;
            let outcome = engine
                .play_game(&GameRng::new(seed), black_box(&league), &game)
                .unwrap();
            black_box(outcome.result.half_innings)
        })
    });
    group.finish();
}

fn bench_round(c: &mut Criterion) {
    let engine = MatchEngine::default();
    let round = fixtures::demo_round();

    let mut group = c.benchmark_group("round");
    group.throughput(Throughput::Elements(round.games.len() as u64));
    group.bench_function("simulate_round", |b| {
        b.iter_batched(
            fixtures::demo_league,
            |mut league| {
                let result = engine
                    .simulate_round(&GameRng::new(17), &mut league, black_box(&round))
                    .unwrap();
                black_box(result.games.len())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_game, bench_round);
criterion_main!(benches);
