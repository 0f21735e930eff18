//! Tournament manager tying the engine to storage and the event feed.

use std::sync::Arc;
use thiserror::Error;

use super::errors::BracketError;
use super::models::{
    Entrant, EntrantId, MatchId, Side, Tournament, TournamentId, TournamentMetadata,
    TournamentStatus, Transition,
};
use super::seeding::Shuffler;
use super::state_machine::BracketEngine;
use crate::store::{StoreError, TournamentRepository};

/// Tournament manager errors
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TournamentError {
    /// Get a client-safe error message
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Bracket(e) => e.client_message(),
            TournamentError::Store(StoreError::NotFound(_)) => "Tournament not found".to_string(),
            TournamentError::Store(StoreError::VersionConflict { .. }) => {
                "The bracket was updated by someone else, please reload".to_string()
            }
            TournamentError::Store(_) => "Internal server error".to_string(),
        }
    }
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// Tournament manager
///
/// Each operation loads the current snapshot, applies the same transition
/// the engine facade uses, saves the successor and only then publishes its
/// events through the engine's publisher.
#[derive(Clone)]
pub struct TournamentManager {
    repository: Arc<dyn TournamentRepository>,
    engine: BracketEngine,
}

impl TournamentManager {
    /// Create a new tournament manager
    pub fn new(repository: Arc<dyn TournamentRepository>, engine: BracketEngine) -> Self {
        Self { repository, engine }
    }

    /// Create and store a draft tournament
    pub async fn create_tournament(
        &self,
        name: &str,
        bracket_size: usize,
        metadata: TournamentMetadata,
    ) -> TournamentResult<Tournament> {
        let tournament = self.engine.create(name, bracket_size, metadata)?;
        Ok(self.repository.save(tournament).await?)
    }

    /// Randomly draw the first round
    pub async fn seed_random(
        &self,
        tournament_id: TournamentId,
        entrants: &[Entrant],
        shuffler: &mut (dyn Shuffler + Send),
    ) -> TournamentResult<Tournament> {
        let current = self.repository.load(tournament_id).await?;
        let transition = current.seed_random(entrants, shuffler)?;
        self.apply(transition).await
    }

    /// Place one entrant at a first-round slot
    pub async fn seed_manual(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        side: Side,
        entrant: Entrant,
    ) -> TournamentResult<Tournament> {
        let current = self.repository.load(tournament_id).await?;
        let transition = current.seed_manual(match_id, side, entrant)?;
        self.apply(transition).await
    }

    /// Empty a first-round slot
    pub async fn clear_slot(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        side: Side,
    ) -> TournamentResult<Tournament> {
        let current = self.repository.load(tournament_id).await?;
        let transition = current.clear_slot(match_id, side)?;
        self.apply(transition).await
    }

    /// Start a tournament
    pub async fn start_tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        let current = self.repository.load(tournament_id).await?;
        let transition = current.start(self.engine.config())?;
        self.apply(transition).await
    }

    /// Record a played match
    pub async fn record_result(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        winner_id: &EntrantId,
        score: &str,
    ) -> TournamentResult<Tournament> {
        let current = self.repository.load(tournament_id).await?;
        let transition = current.record_result(match_id, winner_id, score)?;
        self.apply(transition).await
    }

    /// Advance an entrant without play
    pub async fn record_walkover(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        winner_id: &EntrantId,
    ) -> TournamentResult<Tournament> {
        let current = self.repository.load(tournament_id).await?;
        let transition = current.record_walkover(match_id, winner_id)?;
        self.apply(transition).await
    }

    /// Get tournament snapshot
    pub async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        Ok(self.repository.load(tournament_id).await?)
    }

    /// List all tournaments
    pub async fn list_tournaments(
        &self,
        status_filter: Option<TournamentStatus>,
    ) -> TournamentResult<Vec<Tournament>> {
        Ok(self.repository.list(status_filter).await?)
    }

    async fn apply(&self, transition: Transition) -> TournamentResult<Tournament> {
        let Transition { tournament, events } = transition;
        let saved = self.repository.save(tournament).await?;
        self.engine.publish(&events);
        Ok(saved)
    }
}
