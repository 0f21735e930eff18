//! Match resolution and winner propagation.
//!
//! Recording a result finalizes the match and copies the winner into the
//! next round's slot: match `m` of round `r` feeds match `m / 2` of round
//! `r + 1`, on side A when `m` is even and side B when it is odd. Deciding
//! the final finishes the tournament.

use chrono::Utc;

use super::errors::{BracketError, BracketResult};
use super::models::{
    Entrant, EntrantId, MatchId, MatchStatus, Side, Tournament, TournamentStatus, Transition,
};
use crate::events::BracketEvent;

/// Score text stored for matches decided without play
pub const WALKOVER_SCORE: &str = "W/O";

impl Tournament {
    /// Record the result of a played match
    ///
    /// Not idempotent: recording the same match twice fails with
    /// [`BracketError::AlreadyDecided`].
    pub fn record_result(
        &self,
        match_id: MatchId,
        winner_id: &EntrantId,
        score: &str,
    ) -> BracketResult<Transition> {
        self.validate()?;
        self.ensure_live()?;

        let (r, m) = self
            .locate(match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let current = &self.rounds[r].matches[m];

        if current.is_decided() {
            return Err(BracketError::AlreadyDecided(match_id));
        }

        let (Some(a), Some(b)) = (&current.entrant_a, &current.entrant_b) else {
            return Err(BracketError::IncompleteMatch(match_id));
        };

        let (winner, loser) = if &a.id == winner_id {
            (a, b)
        } else if &b.id == winner_id {
            (b, a)
        } else {
            return Err(BracketError::InvalidWinner {
                match_id,
                winner_id: winner_id.clone(),
            });
        };

        let score = score.trim().to_string();
        let loser_name = Some(loser.display_name.clone());
        self.settle(r, m, winner.clone(), loser_name, score, false)
    }

    /// Advance an entrant without play
    ///
    /// Allowed when the opponent is seated but did not show up, or when the
    /// opponent slot is a bye: empty and impossible to fill.
    pub fn record_walkover(
        &self,
        match_id: MatchId,
        winner_id: &EntrantId,
    ) -> BracketResult<Transition> {
        self.validate()?;
        self.ensure_live()?;

        let (r, m) = self
            .locate(match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let current = &self.rounds[r].matches[m];

        if current.is_decided() {
            return Err(BracketError::AlreadyDecided(match_id));
        }

        let side = current
            .side_of(winner_id)
            .ok_or_else(|| BracketError::InvalidWinner {
                match_id,
                winner_id: winner_id.clone(),
            })?;

        let opponent = current.slot(side.opposite());
        if opponent.is_none() && !self.is_bye(r, m, side.opposite()) {
            return Err(BracketError::WalkoverNotAllowed(match_id));
        }

        let winner = current
            .slot(side)
            .cloned()
            .ok_or(BracketError::IncompleteMatch(match_id))?;
        let loser_name = opponent.map(|e| e.display_name.clone());
        self.settle(r, m, winner, loser_name, WALKOVER_SCORE.to_string(), true)
    }

    /// Whether a slot is empty and can never be filled
    fn is_bye(&self, r: usize, m: usize, side: Side) -> bool {
        let Some(current) = self.rounds.get(r).and_then(|round| round.matches.get(m)) else {
            return false;
        };
        if current.slot(side).is_some() {
            return false;
        }
        // The draw is frozen once live, so an empty first-round slot stays empty
        if r == 0 {
            return true;
        }
        self.is_dead(r - 1, m * 2 + side.feeder_offset())
    }

    /// Whether a match can never produce a winner
    pub(crate) fn is_dead(&self, r: usize, m: usize) -> bool {
        let decided = self
            .rounds
            .get(r)
            .and_then(|round| round.matches.get(m))
            .is_none_or(|current| current.is_decided());
        !decided && self.is_bye(r, m, Side::A) && self.is_bye(r, m, Side::B)
    }

    /// Finalize a match on a successor snapshot and propagate the winner
    fn settle(
        &self,
        r: usize,
        m: usize,
        winner: Entrant,
        loser_name: Option<String>,
        score: String,
        walkover: bool,
    ) -> BracketResult<Transition> {
        let mut next = self.successor();

        let decided = &mut next.rounds[r].matches[m];
        decided.score = Some(score.clone());
        decided.winner_id = Some(winner.id.clone());
        decided.status = MatchStatus::Finished;
        decided.walkover = walkover;
        let match_id = decided.id;

        let mut events = vec![BracketEvent::MatchCompleted {
            tournament_id: next.id,
            group_ref: next.metadata.group_ref.clone(),
            match_id,
            winner_name: winner.display_name.clone(),
            loser_name,
            score: score.clone(),
        }];

        let advanced = Entrant {
            carried_annotation: Some(score),
            ..winner
        };

        if next.is_final_round(r) {
            next.status = TournamentStatus::Finished;
            next.finished_at = Some(Utc::now());

            log::info!(
                "Tournament {} '{}' finished, champion {}",
                next.id,
                next.name,
                advanced.display_name
            );

            events.push(BracketEvent::TournamentCompleted {
                tournament_id: next.id,
                group_ref: next.metadata.group_ref.clone(),
                champion_name: advanced.display_name.clone(),
                champion_avatar_ref: advanced.avatar_ref.clone(),
            });
            next.champion = Some(advanced);
        } else {
            let side = Side::for_index(m);
            let target = next
                .rounds
                .get_mut(r + 1)
                .and_then(|round| round.matches.get_mut(m / 2))
                .ok_or_else(|| {
                    BracketError::MalformedBracket(format!("match {match_id} has no successor"))
                })?;

            let target_id = target.id;
            let slot = target.slot_mut(side);
            if slot.is_some() {
                return Err(BracketError::MalformedBracket(format!(
                    "slot {side} of match {target_id} is already filled"
                )));
            }

            log::debug!(
                "Match {} decided, {} advances to match {} side {}",
                match_id,
                advanced.id,
                target_id,
                side
            );
            *slot = Some(advanced);
        }

        Ok(Transition {
            tournament: next,
            events,
        })
    }
}
