//! Event publisher trait and implementations.

use thiserror::Error;
use tokio::sync::mpsc;

use super::models::BracketEvent;

/// Publisher errors
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Event channel closed")]
    ChannelClosed,

    #[error("Publisher rejected event: {0}")]
    Rejected(String),
}

/// Receives bracket events for the community feed
///
/// Implementations must not block: they are called right after a
/// transition is accepted.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: &BracketEvent) -> Result<(), PublishError>;
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl EventPublisher for NoopPublisher {
    fn publish(&self, _event: &BracketEvent) -> Result<(), PublishError> {
        Ok(())
    }
}

/// Forwards events into an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    sender: mpsc::UnboundedSender<BracketEvent>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BracketEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: mpsc::UnboundedSender<BracketEvent>) -> Self {
        Self { sender }
    }
}

impl EventPublisher for ChannelPublisher {
    fn publish(&self, event: &BracketEvent) -> Result<(), PublishError> {
        self.sender
            .send(event.clone())
            .map_err(|_| PublishError::ChannelClosed)
    }
}

/// Publish events in order, logging and swallowing failures
pub fn publish_all(publisher: &dyn EventPublisher, events: &[BracketEvent]) {
    for event in events {
        if let Err(e) = publisher.publish(event) {
            log::warn!(
                "Failed to publish event for tournament {}: {}",
                event.tournament_id(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn completed(name: &str) -> BracketEvent {
        BracketEvent::TournamentCompleted {
            tournament_id: Uuid::nil(),
            group_ref: None,
            champion_name: name.to_string(),
            champion_avatar_ref: None,
        }
    }

    #[test]
    fn test_channel_publisher_preserves_order() {
        let (publisher, mut receiver) = ChannelPublisher::new();
        publish_all(&publisher, &[completed("first"), completed("second")]);

        assert_eq!(receiver.try_recv().unwrap(), completed("first"));
        assert_eq!(receiver.try_recv().unwrap(), completed("second"));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_reports_error() {
        let (publisher, receiver) = ChannelPublisher::new();
        drop(receiver);

        assert!(matches!(
            publisher.publish(&completed("nobody")),
            Err(PublishError::ChannelClosed)
        ));
        // Swallowed by publish_all
        publish_all(&publisher, &[completed("nobody")]);
    }

    #[test]
    fn test_publishers_share_one_sender() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let singles = ChannelPublisher::from_sender(sender.clone());
        let doubles = ChannelPublisher::from_sender(sender);

        publish_all(&singles, &[completed("Ana")]);
        publish_all(&doubles, &[completed("Bea & Cleo")]);

        assert_eq!(receiver.try_recv().unwrap(), completed("Ana"));
        assert_eq!(receiver.try_recv().unwrap(), completed("Bea & Cleo"));
    }

    #[test]
    fn test_noop_publisher_accepts_everything() {
        assert!(NoopPublisher.publish(&completed("x")).is_ok());
    }
}
