//! Events announced to the community feed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tournament::models::{MatchId, TournamentId, TournamentMetadata};

/// Events produced by bracket transitions
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BracketEvent {
    /// Draw frozen, results may be entered
    TournamentStarted {
        tournament_id: TournamentId,
        tournament_name: String,
        group_ref: Option<String>,
        metadata: TournamentMetadata,
    },
    /// A match was decided, on court or by walkover
    MatchCompleted {
        tournament_id: TournamentId,
        group_ref: Option<String>,
        match_id: MatchId,
        winner_name: String,
        /// `None` when the winner advanced past a bye
        loser_name: Option<String>,
        score: String,
    },
    /// The final was decided
    TournamentCompleted {
        tournament_id: TournamentId,
        group_ref: Option<String>,
        champion_name: String,
        champion_avatar_ref: Option<String>,
    },
}

impl BracketEvent {
    pub fn tournament_id(&self) -> TournamentId {
        match self {
            Self::TournamentStarted { tournament_id, .. }
            | Self::MatchCompleted { tournament_id, .. }
            | Self::TournamentCompleted { tournament_id, .. } => *tournament_id,
        }
    }

    /// Feed the event should be posted to
    pub fn group_ref(&self) -> Option<&str> {
        match self {
            Self::TournamentStarted { group_ref, .. }
            | Self::MatchCompleted { group_ref, .. }
            | Self::TournamentCompleted { group_ref, .. } => group_ref.as_deref(),
        }
    }
}

impl fmt::Display for BracketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::TournamentStarted {
                tournament_name, ..
            } => format!("{tournament_name} has started"),
            Self::MatchCompleted {
                winner_name,
                loser_name: Some(loser_name),
                score,
                ..
            } => format!("{winner_name} defeated {loser_name} {score}"),
            Self::MatchCompleted {
                winner_name,
                loser_name: None,
                ..
            } => format!("{winner_name} advanced by walkover"),
            Self::TournamentCompleted { champion_name, .. } => {
                format!("{champion_name} won the tournament")
            }
        };
        write!(f, "{repr}")
    }
}
