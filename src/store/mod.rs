//! Snapshot persistence for tournaments.
//!
//! The engine never touches storage; callers load a snapshot, apply a
//! transition and save the successor. Saves use optimistic concurrency: a
//! snapshot is accepted only if it is the direct successor of the stored
//! version, so two organizers recording the same match cannot both win.

pub mod errors;
pub mod repository;

pub use errors::{StoreError, StoreResult};
pub use repository::{InMemoryTournamentRepository, TournamentRepository};
