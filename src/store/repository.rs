//! Repository trait definitions for tournament snapshots.
//!
//! This module provides a trait-based abstraction over snapshot storage so
//! the manager can run against a database in production and against the
//! in-memory implementation in tests and embedded setups.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use crate::tournament::{Tournament, TournamentId, TournamentStatus};

/// Trait for tournament snapshot storage
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Load the current snapshot
    async fn load(&self, id: TournamentId) -> StoreResult<Tournament>;

    /// Store a snapshot
    ///
    /// A snapshot for an existing id must carry exactly the stored version
    /// plus one, and a new id must start at version 0, otherwise the save
    /// fails with `VersionConflict`. Archived ids fail with `NotFound`.
    /// Returns the snapshot as stored.
    async fn save(&self, tournament: Tournament) -> StoreResult<Tournament>;

    /// List snapshots, newest first, optionally filtered by status
    async fn list(&self, status: Option<TournamentStatus>) -> StoreResult<Vec<Tournament>>;

    /// Archive a snapshot, removing it from active storage for good
    async fn archive(&self, id: TournamentId) -> StoreResult<Tournament>;
}

/// In-memory implementation of `TournamentRepository`
#[derive(Clone, Default)]
pub struct InMemoryTournamentRepository {
    snapshots: Arc<RwLock<HashMap<TournamentId, Tournament>>>,
    archived: Arc<RwLock<HashSet<TournamentId>>>,
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored snapshot as JSON, for exports and debugging
    pub async fn export_json(&self, id: TournamentId) -> StoreResult<serde_json::Value> {
        let snapshots = self.snapshots.read().await;
        let tournament = snapshots.get(&id).ok_or(StoreError::NotFound(id))?;
        Ok(serde_json::to_value(tournament)?)
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    async fn load(&self, id: TournamentId) -> StoreResult<Tournament> {
        self.snapshots
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, tournament: Tournament) -> StoreResult<Tournament> {
        tournament.validate()?;

        let mut snapshots = self.snapshots.write().await;
        if self.archived.read().await.contains(&tournament.id) {
            log::warn!("Rejected save of archived tournament {}", tournament.id);
            return Err(StoreError::NotFound(tournament.id));
        }

        let expected = snapshots.get(&tournament.id).map_or(0, |stored| stored.version + 1);
        if tournament.version != expected {
            log::warn!(
                "Rejected save of tournament {}: expected version {}, got {}",
                tournament.id,
                expected,
                tournament.version
            );
            return Err(StoreError::VersionConflict {
                expected,
                actual: tournament.version,
            });
        }

        snapshots.insert(tournament.id, tournament.clone());
        Ok(tournament)
    }

    async fn list(&self, status: Option<TournamentStatus>) -> StoreResult<Vec<Tournament>> {
        let snapshots = self.snapshots.read().await;
        let mut tournaments: Vec<Tournament> = snapshots
            .values()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        tournaments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tournaments)
    }

    async fn archive(&self, id: TournamentId) -> StoreResult<Tournament> {
        let mut snapshots = self.snapshots.write().await;
        let archived = snapshots.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.archived.write().await.insert(id);

        log::info!("Archived tournament {} at version {}", id, archived.version);
        Ok(archived)
    }
}
