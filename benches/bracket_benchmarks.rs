use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use club_bracket::{
    BracketConfig, Tournament, TournamentMetadata,
    tournament::{Entrant, IdentityShuffler, RandomShuffler, SUPPORTED_BRACKET_SIZES, build_skeleton},
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn entrants(n: usize) -> Vec<Entrant> {
    (0..n).map(|i| Entrant::from_name(&format!("player{i}"))).collect()
}

/// Helper to create a live tournament with every slot filled
fn setup_live(size: usize) -> Tournament {
    Tournament::create("Bench Cup", size, TournamentMetadata::default())
        .unwrap()
        .seed_random(&entrants(size), &mut IdentityShuffler)
        .unwrap()
        .tournament
        .start(&BracketConfig::default())
        .unwrap()
        .tournament
}

/// Benchmark skeleton construction for every supported size
fn bench_build_skeleton(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_skeleton");
    for size in SUPPORTED_BRACKET_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| build_skeleton(size).unwrap());
        });
    }
    group.finish();
}

/// Benchmark a random draw of a full 64-player bracket
fn bench_seed_random_64(c: &mut Criterion) {
    let draft = Tournament::create("Bench Cup", 64, TournamentMetadata::default()).unwrap();
    let players = entrants(64);
    let mut shuffler = RandomShuffler::with_rng(StdRng::seed_from_u64(1));

    c.bench_function("seed_random_64", |b| {
        b.iter(|| draft.seed_random(&players, &mut shuffler).unwrap());
    });
}

/// Benchmark playing a whole bracket from first round to final
fn bench_resolve_full_bracket(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_full_bracket");
    for size in [8, 32, 64] {
        let live = setup_live(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &live, |b, live| {
            b.iter(|| {
                let mut t = live.clone();
                for r in 0..t.round_count() {
                    for m in 0..t.rounds[r].matches.len() {
                        let current = &t.rounds[r].matches[m];
                        let winner = current.entrant_a.as_ref().unwrap().id.clone();
                        let match_id = current.id;
                        t = t.record_result(match_id, &winner, "6-4 6-4").unwrap().tournament;
                    }
                }
                t
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build_skeleton,
    bench_seed_random_64,
    bench_resolve_full_bracket
);
criterion_main!(benches);
