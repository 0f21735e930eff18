//! Tournament lifecycle: draft → live → finished.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::builder::build_skeleton;
use super::errors::{BracketError, BracketResult};
use super::models::{
    Entrant, EntrantId, MatchId, Side, Tournament, TournamentMetadata, TournamentStatus,
    Transition,
};
use super::seeding::Shuffler;
use crate::config::{BracketConfig, ByePolicy};
use crate::events::{BracketEvent, EventPublisher, NoopPublisher, publish_all};

impl Tournament {
    /// Create a draft tournament with an empty skeleton
    pub fn create(
        name: &str,
        bracket_size: usize,
        metadata: TournamentMetadata,
    ) -> BracketResult<Tournament> {
        let rounds = build_skeleton(bracket_size)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(BracketError::InvalidName);
        }

        Ok(Tournament {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bracket_size,
            status: TournamentStatus::Draft,
            rounds,
            metadata,
            champion: None,
            version: 0,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        })
    }

    /// Freeze the draw and open result entry
    pub fn start(&self, config: &BracketConfig) -> BracketResult<Transition> {
        self.validate()?;
        self.ensure_draft()?;

        let seeded = self.seeded_count();
        if seeded < config.min_entrants {
            return Err(BracketError::InsufficientEntrants {
                needed: config.min_entrants,
                current: seeded,
            });
        }

        if config.bye_policy == ByePolicy::Reject {
            let open = self.bracket_size - seeded;
            if open > 0 {
                return Err(BracketError::UnfilledSlots(open));
            }
        }

        let mut next = self.successor();
        next.status = TournamentStatus::Live;
        next.started_at = Some(Utc::now());

        log::info!(
            "Tournament {} '{}' started with {} entrants",
            next.id,
            next.name,
            seeded
        );

        let event = BracketEvent::TournamentStarted {
            tournament_id: next.id,
            tournament_name: next.name.clone(),
            group_ref: next.metadata.group_ref.clone(),
            metadata: next.metadata.clone(),
        };

        Ok(Transition {
            tournament: next,
            events: vec![event],
        })
    }

    pub(crate) fn ensure_draft(&self) -> BracketResult<()> {
        match self.status {
            TournamentStatus::Draft => Ok(()),
            TournamentStatus::Live => Err(BracketError::NotDraft(self.status)),
            TournamentStatus::Finished => Err(BracketError::TournamentFinished),
        }
    }

    pub(crate) fn ensure_live(&self) -> BracketResult<()> {
        match self.status {
            TournamentStatus::Live => Ok(()),
            TournamentStatus::Draft => Err(BracketError::NotLive(self.status)),
            TournamentStatus::Finished => Err(BracketError::TournamentFinished),
        }
    }
}

/// Synchronous facade over the tournament transitions
///
/// Applies each transition to the given snapshot, publishes the resulting
/// events, and hands back the successor. The input snapshot is never
/// modified; persisting the successor is the caller's job.
#[derive(Clone)]
pub struct BracketEngine {
    config: BracketConfig,
    publisher: Arc<dyn EventPublisher>,
}

impl BracketEngine {
    /// Create an engine with the given policies and publisher
    pub fn new(config: BracketConfig, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { config, publisher }
    }

    pub fn config(&self) -> &BracketConfig {
        &self.config
    }

    /// Hand events to the publisher, best-effort
    pub fn publish(&self, events: &[BracketEvent]) {
        publish_all(self.publisher.as_ref(), events);
    }

    fn commit(&self, transition: Transition) -> Tournament {
        self.publish(&transition.events);
        transition.tournament
    }

    pub fn create(
        &self,
        name: &str,
        bracket_size: usize,
        metadata: TournamentMetadata,
    ) -> BracketResult<Tournament> {
        let tournament = Tournament::create(name, bracket_size, metadata)?;
        log::info!(
            "Created tournament {} '{}' ({} slots)",
            tournament.id,
            tournament.name,
            bracket_size
        );
        Ok(tournament)
    }

    pub fn seed_random(
        &self,
        tournament: &Tournament,
        entrants: &[Entrant],
        shuffler: &mut dyn Shuffler,
    ) -> BracketResult<Tournament> {
        tournament
            .seed_random(entrants, shuffler)
            .map(|t| self.commit(t))
    }

    pub fn seed_manual(
        &self,
        tournament: &Tournament,
        match_id: MatchId,
        side: Side,
        entrant: Entrant,
    ) -> BracketResult<Tournament> {
        tournament
            .seed_manual(match_id, side, entrant)
            .map(|t| self.commit(t))
    }

    pub fn clear_slot(
        &self,
        tournament: &Tournament,
        match_id: MatchId,
        side: Side,
    ) -> BracketResult<Tournament> {
        tournament
            .clear_slot(match_id, side)
            .map(|t| self.commit(t))
    }

    pub fn start(&self, tournament: &Tournament) -> BracketResult<Tournament> {
        tournament.start(&self.config).map(|t| self.commit(t))
    }

    pub fn record_result(
        &self,
        tournament: &Tournament,
        match_id: MatchId,
        winner_id: &EntrantId,
        score: &str,
    ) -> BracketResult<Tournament> {
        tournament
            .record_result(match_id, winner_id, score)
            .map(|t| self.commit(t))
    }

    pub fn record_walkover(
        &self,
        tournament: &Tournament,
        match_id: MatchId,
        winner_id: &EntrantId,
    ) -> BracketResult<Tournament> {
        tournament
            .record_walkover(match_id, winner_id)
            .map(|t| self.commit(t))
    }
}

impl Default for BracketEngine {
    fn default() -> Self {
        Self::new(BracketConfig::default(), Arc::new(NoopPublisher))
    }
}
