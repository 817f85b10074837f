use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use fusion_2048::core::rng::DeterministicRng;
use fusion_2048::game::{replay_moves, resolve_move, Direction, GameState, ReactionTable};
use fusion_2048::GameConfig;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_moves(seed: u64, count: usize) -> Vec<Direction> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| Direction::ALL[rng.gen_range(0..4)]).collect()
}

/// Mid-game positions of varying density.
fn corpus() -> Vec<GameState> {
    let config = GameConfig::with_seed(42);
    (0..8)
        .map(|i| replay_moves(&config, 0.2, &random_moves(i, 10 + 15 * i as usize)).0)
        .filter(|state| !state.is_terminated())
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let config = GameConfig::default();
    let reactions = ReactionTable::builtin();

    for direction in Direction::ALL {
        c.bench_function(&format!("resolve/{direction}"), |bch| {
            let states = corpus();
            bch.iter_batched(
                || (states.clone(), DeterministicRng::new(7)),
                |(mut states, mut rng)| {
                    for state in &mut states {
                        black_box(resolve_move(state, direction, &config, reactions, &mut rng, |_| {}));
                    }
                    states
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_replay(c: &mut Criterion) {
    let config = GameConfig::with_seed(9);
    let moves = random_moves(3, 500);
    c.bench_function("replay/500", |bch| {
        bch.iter(|| black_box(replay_moves(&config, 0.1, &moves).0.compute_hash()))
    });
}

criterion_group!(benches, bench_resolve, bench_replay);
criterion_main!(benches);
