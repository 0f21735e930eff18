//! Bracket error types.

use thiserror::Error;

use super::models::{EntrantId, MatchId, Side, TournamentStatus};

/// Bracket errors
///
/// Every failing operation returns exactly one of these and leaves the
/// input snapshot untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Bracket size is not one of 2, 4, 8, 16, 32, 64
    #[error("Invalid bracket size {0}: must be one of 2, 4, 8, 16, 32, 64")]
    InvalidBracketSize(usize),

    /// Entrant already registered or seated in the first round
    #[error("Duplicate entrant: {0}")]
    DuplicateEntrant(EntrantId),

    /// Manual seeding target already filled
    #[error("Slot {side} of match {match_id} is already occupied")]
    SlotOccupied { match_id: MatchId, side: Side },

    /// More entrants than first-round slots
    #[error("Too many entrants: {count} for {capacity} slots")]
    TooManyEntrants { count: usize, capacity: usize },

    /// Blank id or display name
    #[error("Invalid entrant: {0}")]
    InvalidEntrant(String),

    /// Registry capacity reached
    #[error("Entrant registry is full ({0} entrants)")]
    RegistryFull(usize),

    /// Blank tournament name
    #[error("Tournament name must not be blank")]
    InvalidName,

    /// Operation requires a draft tournament
    #[error("Tournament is not in draft (status: {0})")]
    NotDraft(TournamentStatus),

    /// Operation requires a live tournament
    #[error("Tournament is not live (status: {0})")]
    NotLive(TournamentStatus),

    /// Finished tournaments are immutable
    #[error("Tournament is finished")]
    TournamentFinished,

    /// Not enough entrants seeded to start
    #[error("Insufficient entrants: need {needed}, have {current}")]
    InsufficientEntrants { needed: usize, current: usize },

    /// Empty first-round slots while byes are rejected
    #[error("{0} first-round slots are unfilled")]
    UnfilledSlots(usize),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Result entered before both slots are filled
    #[error("Match {0} does not have two entrants yet")]
    IncompleteMatch(MatchId),

    /// Winner is not seated in the match
    #[error("Entrant {winner_id} is not playing in match {match_id}")]
    InvalidWinner {
        match_id: MatchId,
        winner_id: EntrantId,
    },

    /// Result already recorded
    #[error("Match {0} is already decided")]
    AlreadyDecided(MatchId),

    /// Opponent slot may still be filled by a pending match
    #[error("Walkover not allowed in match {0}: opponent slot is still open")]
    WalkoverNotAllowed(MatchId),

    /// Snapshot violates a structural invariant
    #[error("Malformed bracket: {0}")]
    MalformedBracket(String),
}

impl BracketError {
    /// Get a message suitable for showing to club members
    pub fn client_message(&self) -> String {
        match self {
            BracketError::InvalidBracketSize(_) => {
                "Bracket size must be 2, 4, 8, 16, 32 or 64 players".to_string()
            }
            BracketError::NotDraft(_) => "The draw is locked once the tournament starts".to_string(),
            BracketError::NotLive(_) => "Results can only be entered while the tournament is running".to_string(),
            BracketError::TournamentFinished => "This tournament is already over".to_string(),
            BracketError::IncompleteMatch(_) => "Both players must be known before entering a result".to_string(),
            BracketError::AlreadyDecided(_) => "A result was already entered for this match".to_string(),
            // Internal details stay in the logs
            BracketError::MalformedBracket(_) => "The bracket could not be read".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
