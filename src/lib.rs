//! # Club Bracket
//!
//! Single-elimination tournament brackets for a tennis club platform.
//!
//! The engine is a set of pure state transitions over a [`Tournament`]
//! snapshot. Storage and announcements sit behind traits so the
//! application can plug in its own database and community feed.
//!
//! ## Lifecycle
//!
//! - **Draft**: skeleton built, first round seeded and re-seeded freely
//! - **Live**: draw frozen, results recorded match by match
//! - **Finished**: final decided, snapshot immutable
//!
//! ## Core Modules
//!
//! - [`tournament`]: Bracket models, builder, seeding, resolver and state machine
//! - [`events`]: Feed events and the publisher seam
//! - [`store`]: Snapshot repository with optimistic versioning
//! - [`config`]: Engine policies
//!
//! ## Example
//!
//! ```
//! use club_bracket::{Tournament, TournamentMetadata};
//!
//! let cup = Tournament::create("Cup", 8, TournamentMetadata::default()).unwrap();
//! assert_eq!(cup.round_count(), 3);
//! ```

/// Engine configuration.
pub mod config;
pub use config::{BracketConfig, ByePolicy, ConfigError};

/// Events announced to the community feed.
pub mod events;
pub use events::{BracketEvent, EventPublisher};

/// Snapshot persistence.
pub mod store;

/// Bracket engine.
pub mod tournament;
pub use tournament::{
    BracketEngine, BracketError, BracketResult, Entrant, EntrantId, MatchId, Side, Tournament,
    TournamentManager, TournamentMetadata, TournamentStatus,
};
