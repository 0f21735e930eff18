//! Bracket events and the publisher seam used to announce them.
//!
//! Events are produced by tournament transitions and handed to an
//! [`EventPublisher`] after the new snapshot is accepted. Publishing is
//! best-effort: a failing publisher is logged and never fails the
//! transition that produced the event.
//!
//! ## Example
//!
//! ```
//! use club_bracket::events::{BracketEvent, ChannelPublisher, EventPublisher};
//!
//! let (publisher, mut feed) = ChannelPublisher::new();
//! publisher
//!     .publish(&BracketEvent::TournamentCompleted {
//!         tournament_id: uuid::Uuid::nil(),
//!         group_ref: Some("club-juniors".to_string()),
//!         champion_name: "Ana".to_string(),
//!         champion_avatar_ref: None,
//!     })
//!     .unwrap();
//!
//! let event = feed.try_recv().unwrap();
//! assert_eq!(event.to_string(), "Ana won the tournament");
//! ```

pub mod models;
pub mod publisher;

pub use models::BracketEvent;
pub use publisher::{ChannelPublisher, EventPublisher, NoopPublisher, PublishError, publish_all};
