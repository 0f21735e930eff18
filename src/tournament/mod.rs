//! Single-elimination bracket engine.
//!
//! This module provides the bracket lifecycle:
//! - Skeleton building for 2 to 64 slot draws
//! - Entrant validation and first-round seeding (random or manual)
//! - Result recording, walkovers and winner propagation
//! - The draft → live → finished state machine
//!
//! Every operation takes a snapshot and returns a [`Transition`] holding
//! the successor snapshot and the events it produced; the input is never
//! modified and a failure never leaves partial changes behind.
//!
//! ## Example
//!
//! ```
//! use club_bracket::tournament::{
//!     BracketEngine, Entrant, EntrantId, IdentityShuffler, TournamentMetadata, TournamentStatus,
//! };
//!
//! let engine = BracketEngine::default();
//! let draft = engine.create("Club Cup", 2, TournamentMetadata::for_group("club")).unwrap();
//! let seeded = engine
//!     .seed_random(
//!         &draft,
//!         &[Entrant::from_name("Ana"), Entrant::from_name("Bea")],
//!         &mut IdentityShuffler,
//!     )
//!     .unwrap();
//! let live = engine.start(&seeded).unwrap();
//!
//! let final_id = live.rounds[0].matches[0].id;
//! let done = engine
//!     .record_result(&live, final_id, &EntrantId::from("Bea"), "6-4 6-4")
//!     .unwrap();
//!
//! assert_eq!(done.status, TournamentStatus::Finished);
//! assert_eq!(done.champion().unwrap().display_name, "Bea");
//! ```

pub mod builder;
pub mod errors;
pub mod manager;
pub mod models;
pub mod registry;
pub mod resolver;
pub mod seeding;
pub mod state_machine;

pub use builder::{SUPPORTED_BRACKET_SIZES, build_skeleton, round_label};
pub use errors::{BracketError, BracketResult};
pub use manager::{TournamentError, TournamentManager, TournamentResult};
pub use models::{
    Entrant, EntrantId, Match, MatchId, MatchStatus, Round, Side, Tournament, TournamentId,
    TournamentMetadata, TournamentStatus, Transition,
};
pub use registry::EntrantRegistry;
pub use resolver::WALKOVER_SCORE;
pub use seeding::{IdentityShuffler, RandomShuffler, Shuffler};
pub use state_machine::BracketEngine;
