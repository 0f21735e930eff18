//! Bracket skeleton construction and structural validation.

use std::collections::HashSet;

use super::errors::{BracketError, BracketResult};
use super::models::{Match, MatchId, MatchStatus, Round, Tournament, TournamentStatus};

/// Bracket sizes the engine supports
pub const SUPPORTED_BRACKET_SIZES: [usize; 6] = [2, 4, 8, 16, 32, 64];

/// Check a bracket size and return its round count
pub fn rounds_for_size(bracket_size: usize) -> BracketResult<usize> {
    if !SUPPORTED_BRACKET_SIZES.contains(&bracket_size) {
        return Err(BracketError::InvalidBracketSize(bracket_size));
    }
    Ok(bracket_size.trailing_zeros() as usize)
}

/// Label for a round with the given number of matches
///
/// The final is "FINAL", the two-match round is "SEMIFINALS", earlier
/// rounds are named by the number of players left ("1/8th", "1/16th", ...).
pub fn round_label(match_count: usize) -> String {
    match match_count {
        1 => "FINAL".to_string(),
        2 => "SEMIFINALS".to_string(),
        n => format!("1/{}th", n * 2),
    }
}

/// Build the empty round/match tree for a bracket
///
/// Rounds are ordered first to final; match ids are assigned sequentially
/// from 1 in round order.
pub fn build_skeleton(bracket_size: usize) -> BracketResult<Vec<Round>> {
    let round_count = rounds_for_size(bracket_size)?;

    let mut next_id = 1u32;
    let mut rounds = Vec::with_capacity(round_count);
    for k in 0..round_count {
        let match_count = bracket_size >> (k + 1);
        let matches = (0..match_count)
            .map(|slot_index| {
                let m = Match::new(MatchId(next_id), slot_index);
                next_id += 1;
                m
            })
            .collect();
        rounds.push(Round {
            label: round_label(match_count),
            matches,
        });
    }

    Ok(rounds)
}

fn malformed(detail: String) -> BracketError {
    BracketError::MalformedBracket(detail)
}

impl Tournament {
    /// Check the structural invariants of a snapshot
    ///
    /// Called at the start of every transition so that snapshots coming back
    /// from storage or the presentation layer are never trusted blindly.
    pub fn validate(&self) -> BracketResult<()> {
        let round_count = rounds_for_size(self.bracket_size)?;
        if self.rounds.len() != round_count {
            return Err(malformed(format!(
                "expected {round_count} rounds, found {}",
                self.rounds.len()
            )));
        }

        let mut match_ids = HashSet::new();
        for (k, round) in self.rounds.iter().enumerate() {
            let expected = self.bracket_size >> (k + 1);
            if round.matches.len() != expected {
                return Err(malformed(format!(
                    "round {k} has {} matches, expected {expected}",
                    round.matches.len()
                )));
            }

            let mut seated = HashSet::new();
            for m in &round.matches {
                if !match_ids.insert(m.id) {
                    return Err(malformed(format!("match id {} is used twice", m.id)));
                }
                for entrant in m.entrants() {
                    if !seated.insert(&entrant.id) {
                        return Err(malformed(format!(
                            "entrant {} is seated twice in round {k}",
                            entrant.id
                        )));
                    }
                }
                if let Some(winner_id) = &m.winner_id {
                    if m.side_of(winner_id).is_none() {
                        return Err(malformed(format!(
                            "winner of match {} is not one of its entrants",
                            m.id
                        )));
                    }
                }
                if m.is_decided() != (m.status == MatchStatus::Finished) {
                    return Err(malformed(format!(
                        "match {} status disagrees with its winner",
                        m.id
                    )));
                }
            }
        }

        let final_decided = self
            .rounds
            .last()
            .and_then(|round| round.matches.first())
            .is_some_and(Match::is_decided);
        if final_decided != (self.status == TournamentStatus::Finished) {
            return Err(malformed(format!(
                "status {} disagrees with the final match",
                self.status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::models::{Entrant, EntrantId, TournamentMetadata};

    /// Four-slot draft with Ana and Bea seated in the first match
    fn seated_draft() -> Tournament {
        let mut t = Tournament::create("Cup", 4, TournamentMetadata::default()).unwrap();
        t.rounds[0].matches[0].entrant_a = Some(Entrant::from_name("Ana"));
        t.rounds[0].matches[0].entrant_b = Some(Entrant::from_name("Bea"));
        t
    }

    fn decide(m: &mut Match, winner: &str) {
        m.winner_id = Some(EntrantId::from(winner));
        m.status = MatchStatus::Finished;
    }

    fn assert_malformed(t: &Tournament, detail: &str) {
        match t.validate() {
            Err(BracketError::MalformedBracket(msg)) => {
                assert!(msg.contains(detail), "unexpected detail: {msg}")
            }
            other => panic!("expected MalformedBracket, got {other:?}"),
        }
    }

    #[test]
    fn test_skeleton_shape_for_all_sizes() {
        for size in SUPPORTED_BRACKET_SIZES {
            let rounds = build_skeleton(size).unwrap();
            assert_eq!(rounds.len(), size.trailing_zeros() as usize);
            for (k, round) in rounds.iter().enumerate() {
                assert_eq!(round.matches.len(), size / 2usize.pow(k as u32 + 1));
            }
            assert_eq!(rounds.last().unwrap().matches.len(), 1);
        }
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        for size in [0, 1, 3, 6, 12, 128] {
            assert_eq!(
                build_skeleton(size),
                Err(BracketError::InvalidBracketSize(size))
            );
        }
    }

    #[test]
    fn test_match_ids_unique_and_sequential() {
        let rounds = build_skeleton(16).unwrap();
        let ids: Vec<u32> = rounds
            .iter()
            .flat_map(|r| r.matches.iter().map(|m| m.id.0))
            .collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn test_round_labels() {
        let labels: Vec<String> = build_skeleton(32)
            .unwrap()
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["1/32th", "1/16th", "1/8th", "SEMIFINALS", "FINAL"]);
    }

    #[test]
    fn test_slot_indices_follow_position() {
        let rounds = build_skeleton(8).unwrap();
        for round in &rounds {
            for (i, m) in round.matches.iter().enumerate() {
                assert_eq!(m.slot_index, i);
                assert_eq!(m.status, MatchStatus::Pending);
                assert!(m.is_empty());
            }
        }
    }

    #[test]
    fn test_validate_accepts_consistent_snapshot() {
        let mut t = seated_draft();
        t.status = TournamentStatus::Live;
        decide(&mut t.rounds[0].matches[0], "Ana");
        t.rounds[1].matches[0].entrant_a = Some(Entrant::from_name("Ana"));

        assert_eq!(t.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unsupported_size() {
        let mut t = seated_draft();
        t.bracket_size = 6;
        assert_eq!(t.validate(), Err(BracketError::InvalidBracketSize(6)));
    }

    #[test]
    fn test_validate_rejects_wrong_match_count() {
        let mut t = seated_draft();
        t.rounds[0].matches.pop();
        assert_malformed(&t, "round 0 has 1 matches, expected 2");
    }

    #[test]
    fn test_validate_rejects_duplicate_match_id() {
        let mut t = seated_draft();
        t.rounds[1].matches[0].id = MatchId(1);
        assert_malformed(&t, "match id #1 is used twice");
    }

    #[test]
    fn test_validate_rejects_entrant_seated_twice() {
        let mut t = seated_draft();
        t.rounds[0].matches[1].entrant_b = Some(Entrant::from_name("Ana"));
        assert_malformed(&t, "entrant Ana is seated twice in round 0");
    }

    #[test]
    fn test_validate_rejects_foreign_winner() {
        let mut t = seated_draft();
        decide(&mut t.rounds[0].matches[0], "Zoe");
        assert_malformed(&t, "is not one of its entrants");
    }

    #[test]
    fn test_validate_rejects_status_without_winner() {
        let mut t = seated_draft();
        t.rounds[0].matches[0].status = MatchStatus::Finished;
        assert_malformed(&t, "status disagrees with its winner");

        let mut t = seated_draft();
        t.rounds[0].matches[0].winner_id = Some(EntrantId::from("Ana"));
        assert_malformed(&t, "status disagrees with its winner");
    }

    #[test]
    fn test_validate_rejects_status_disagreeing_with_final() {
        let mut t = seated_draft();
        t.status = TournamentStatus::Finished;
        assert_malformed(&t, "disagrees with the final match");

        let mut t = seated_draft();
        t.status = TournamentStatus::Live;
        let final_match = &mut t.rounds[1].matches[0];
        final_match.entrant_a = Some(Entrant::from_name("Cleo"));
        final_match.entrant_b = Some(Entrant::from_name("Dana"));
        decide(final_match, "Cleo");
        assert_malformed(&t, "disagrees with the final match");
    }
}
