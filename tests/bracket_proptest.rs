/// Property-based tests for bracket building, seeding and propagation
///
/// These tests verify the structural guarantees of the engine across
/// every supported bracket size and arbitrary draws and results.
use club_bracket::BracketConfig;
use club_bracket::tournament::{
    Entrant, RandomShuffler, SUPPORTED_BRACKET_SIZES, Side, Tournament, TournamentMetadata,
    TournamentStatus, build_skeleton,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

// Strategy to pick a supported bracket size
fn bracket_size_strategy() -> impl Strategy<Value = usize> {
    prop::sample::select(SUPPORTED_BRACKET_SIZES.to_vec())
}

fn entrants(n: usize) -> Vec<Entrant> {
    (0..n).map(|i| Entrant::from_name(&format!("Entrant {i}"))).collect()
}

fn seeded_live(size: usize, seed: u64) -> Tournament {
    let mut shuffler = RandomShuffler::with_rng(StdRng::seed_from_u64(seed));
    Tournament::create("Prop Cup", size, TournamentMetadata::default())
        .unwrap()
        .seed_random(&entrants(size), &mut shuffler)
        .unwrap()
        .tournament
        .start(&BracketConfig::default())
        .unwrap()
        .tournament
}

proptest! {
    #[test]
    fn test_skeleton_halves_each_round(size in bracket_size_strategy()) {
        let rounds = build_skeleton(size).unwrap();

        prop_assert_eq!(rounds.len(), size.trailing_zeros() as usize);
        for (k, round) in rounds.iter().enumerate() {
            prop_assert_eq!(round.matches.len(), size >> (k + 1));
        }
        prop_assert_eq!(rounds.last().unwrap().matches.len(), 1);
    }

    #[test]
    fn test_full_draw_seats_everyone_once(size in bracket_size_strategy(), seed in any::<u64>()) {
        let t = seeded_live(size, seed);

        let seated: Vec<_> = t.rounds[0]
            .matches
            .iter()
            .flat_map(|m| m.entrants().map(|e| e.id.clone()))
            .collect();
        let unique: HashSet<_> = seated.iter().cloned().collect();

        prop_assert_eq!(seated.len(), size);
        prop_assert_eq!(unique.len(), size);
    }

    #[test]
    fn test_winner_lands_in_feeder_slot(
        size in bracket_size_strategy(),
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<bool>(), 63),
    ) {
        let mut t = seeded_live(size, seed);
        let mut pick = picks.into_iter();

        for r in 0..t.round_count() {
            for m in 0..t.rounds[r].matches.len() {
                let current = &t.rounds[r].matches[m];
                let side = if pick.next().unwrap_or(true) { Side::A } else { Side::B };
                let winner = current.slot(side).unwrap().id.clone();
                let match_id = current.id;

                t = t.record_result(match_id, &winner, "6-4 6-4").unwrap().tournament;

                if r + 1 < t.round_count() {
                    let target = &t.rounds[r + 1].matches[m / 2];
                    let landed = target.slot(Side::for_index(m)).map(|e| e.id.clone());
                    prop_assert_eq!(landed, Some(winner));
                    prop_assert_eq!(t.status, TournamentStatus::Live);
                } else {
                    prop_assert_eq!(t.status, TournamentStatus::Finished);
                    prop_assert_eq!(t.champion().map(|e| e.id.clone()), Some(winner));
                }
            }
        }
    }

    #[test]
    fn test_failed_result_leaves_snapshot_unchanged(size in bracket_size_strategy(), seed in any::<u64>()) {
        let t = seeded_live(size, seed);
        let before = t.clone();

        // Later-round matches are still empty
        if t.round_count() > 1 {
            let later = t.rounds[1].matches[0].id;
            let winner = t.rounds[0].matches[0].entrant_a.as_ref().unwrap().id.clone();
            prop_assert!(t.record_result(later, &winner, "6-0 6-0").is_err());
        }
        prop_assert_eq!(t, before);
    }
}
