//! Bracket data models for single-elimination tournaments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::events::BracketEvent;

/// Tournament ID type
pub type TournamentId = Uuid;

/// Match identifier, unique within a bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u32);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entrant identifier (member id, or the name for ad-hoc entrants)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntrantId(String);

impl EntrantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntrantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntrantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A participant placed into a bracket slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    /// Identity preserved across every round
    pub id: EntrantId,
    /// Name shown in the bracket and feed posts
    pub display_name: String,
    /// Avatar image reference
    pub avatar_ref: Option<String>,
    /// Score of the match this entrant just won
    pub carried_annotation: Option<String>,
}

impl Entrant {
    /// Create a new entrant
    pub fn new(id: impl Into<EntrantId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_ref: None,
            carried_annotation: None,
        }
    }

    /// Create an ad-hoc entrant identified by its (trimmed) name
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::new(name, name)
    }

    /// Attach an avatar reference
    pub fn with_avatar(mut self, avatar_ref: impl Into<String>) -> Self {
        self.avatar_ref = Some(avatar_ref.into());
        self
    }
}

/// Slot side within a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Side in the next round fed by the match at `index`
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 { Side::A } else { Side::B }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Offset of the feeder match for this side (`2m` for A, `2m + 1` for B)
    pub(crate) fn feeder_offset(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Waiting for entrants or a result
    Pending,
    /// Winner recorded
    Finished,
}

/// A single match between two slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Position within its round
    pub slot_index: usize,
    pub entrant_a: Option<Entrant>,
    pub entrant_b: Option<Entrant>,
    /// Free-form score text, e.g. "6-4 3-6 10-8"
    pub score: Option<String>,
    pub winner_id: Option<EntrantId>,
    pub status: MatchStatus,
    /// Decided without being played
    #[serde(default)]
    pub walkover: bool,
}

impl Match {
    /// Create an empty pending match
    pub fn new(id: MatchId, slot_index: usize) -> Self {
        Self {
            id,
            slot_index,
            entrant_a: None,
            entrant_b: None,
            score: None,
            winner_id: None,
            status: MatchStatus::Pending,
            walkover: false,
        }
    }

    pub fn slot(&self, side: Side) -> Option<&Entrant> {
        match side {
            Side::A => self.entrant_a.as_ref(),
            Side::B => self.entrant_b.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Option<Entrant> {
        match side {
            Side::A => &mut self.entrant_a,
            Side::B => &mut self.entrant_b,
        }
    }

    /// Both slots filled
    pub fn is_full(&self) -> bool {
        self.entrant_a.is_some() && self.entrant_b.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entrant_a.is_none() && self.entrant_b.is_none()
    }

    /// Winner recorded
    pub fn is_decided(&self) -> bool {
        self.winner_id.is_some()
    }

    /// Side occupied by the given entrant, if any
    pub fn side_of(&self, id: &EntrantId) -> Option<Side> {
        if self.entrant_a.as_ref().is_some_and(|e| &e.id == id) {
            Some(Side::A)
        } else if self.entrant_b.as_ref().is_some_and(|e| &e.id == id) {
            Some(Side::B)
        } else {
            None
        }
    }

    /// Entrants currently seated in this match
    pub fn entrants(&self) -> impl Iterator<Item = &Entrant> {
        self.entrant_a.iter().chain(self.entrant_b.iter())
    }

    pub fn winner(&self) -> Option<&Entrant> {
        let winner_id = self.winner_id.as_ref()?;
        self.entrants().find(|e| &e.id == winner_id)
    }

    pub fn loser(&self) -> Option<&Entrant> {
        let winner_id = self.winner_id.as_ref()?;
        self.entrants().find(|e| &e.id != winner_id)
    }
}

/// One round of the bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// "FINAL", "SEMIFINALS", "1/8th", ...
    pub label: String,
    pub matches: Vec<Match>,
}

impl Round {
    /// Whether any match in this round seats the entrant
    pub fn contains(&self, id: &EntrantId) -> bool {
        self.matches.iter().any(|m| m.side_of(id).is_some())
    }

    /// Number of occupied slots
    pub fn seated_count(&self) -> usize {
        self.matches.iter().map(|m| m.entrants().count()).sum()
    }

    /// Number of slots in this round
    pub fn capacity(&self) -> usize {
        self.matches.len() * 2
    }
}

/// Tournament status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Seeding is open
    Draft,
    /// Results are being recorded
    Live,
    /// Champion decided, snapshot is immutable
    Finished,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentStatus::Draft => write!(f, "draft"),
            TournamentStatus::Live => write!(f, "live"),
            TournamentStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Descriptive data carried along with the bracket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentMetadata {
    /// Club group whose feed receives announcements
    pub group_ref: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl TournamentMetadata {
    pub fn for_group(group_ref: impl Into<String>) -> Self {
        Self {
            group_ref: Some(group_ref.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }
}

/// Tournament snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Number of first-round slots (power of two)
    pub bracket_size: usize,
    pub status: TournamentStatus,
    /// Rounds ordered from first to final
    pub rounds: Vec<Round>,
    pub metadata: TournamentMetadata,
    /// Winner of the final
    pub champion: Option<Entrant>,
    /// Bumped by one on every transition
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Tournament {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_final_round(&self, round_index: usize) -> bool {
        round_index + 1 == self.rounds.len()
    }

    /// Round and match index of a match
    pub fn locate(&self, match_id: MatchId) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round
                .matches
                .iter()
                .position(|m| m.id == match_id)
                .map(|m| (r, m))
        })
    }

    pub fn find_match(&self, match_id: MatchId) -> Option<&Match> {
        self.locate(match_id)
            .map(|(r, m)| &self.rounds[r].matches[m])
    }

    /// Index of the earliest round that still has a match to be decided
    ///
    /// Matches that can never produce a winner are skipped once the draw is
    /// live. A finished tournament has no current round.
    pub fn current_round(&self) -> Option<usize> {
        if self.status == TournamentStatus::Finished {
            return None;
        }
        let live = self.status == TournamentStatus::Live;
        self.rounds.iter().enumerate().position(|(r, round)| {
            round
                .matches
                .iter()
                .enumerate()
                .any(|(m, current)| !current.is_decided() && !(live && self.is_dead(r, m)))
        })
    }

    /// Matches ready to be scored
    pub fn pending_matches(&self) -> Vec<&Match> {
        if self.status != TournamentStatus::Live {
            return Vec::new();
        }
        self.rounds
            .iter()
            .flat_map(|round| round.matches.iter())
            .filter(|m| m.is_full() && !m.is_decided())
            .collect()
    }

    pub fn champion(&self) -> Option<&Entrant> {
        self.champion.as_ref()
    }

    /// Entrants seated in the first round
    pub fn seeded_count(&self) -> usize {
        self.rounds.first().map_or(0, Round::seated_count)
    }

    /// Copy of this snapshot with the version bumped
    pub(crate) fn successor(&self) -> Tournament {
        let mut next = self.clone();
        next.version += 1;
        next
    }
}

/// Result of a state transition: the successor snapshot and the events it produced
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub tournament: Tournament,
    pub events: Vec<BracketEvent>,
}

impl Transition {
    pub(crate) fn quiet(tournament: Tournament) -> Self {
        Self {
            tournament,
            events: Vec::new(),
        }
    }
}
