//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{BattleEvent, NarrationEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle lifecycle (start, state changes, level ups, outcome)
    Battle,
    /// Narration lines
    Narration,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Battle(BattleEvent),
    Narration(NarrationEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle(_) => Topic::Battle,
            Event::Narration(_) => Topic::Narration,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    battle: broadcast::Sender<Event>,
    narration: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            battle: broadcast::channel(capacity).0,
            narration: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Narration => &self.narration,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::BattleOutcome;

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut battle = bus.subscribe(Topic::Battle);
        let mut narration = bus.subscribe(Topic::Narration);

        bus.publish(Event::Narration(NarrationEvent {
            text: "hello".into(),
        }));
        bus.publish(Event::Battle(BattleEvent::Over {
            outcome: BattleOutcome::Fled,
        }));

        assert!(matches!(
            battle.try_recv(),
            Ok(Event::Battle(BattleEvent::Over { outcome: BattleOutcome::Fled }))
        ));
        assert!(battle.try_recv().is_err());
        assert!(matches!(narration.try_recv(), Ok(Event::Narration(_))));
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(4);
        bus.publish(Event::Narration(NarrationEvent { text: "x".into() }));
    }
}
