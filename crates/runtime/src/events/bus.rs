use tokio::sync::broadcast;

use game_core::EngineEvent;

use crate::api::AgentError;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Queue, transit and lock outcomes
    Movement,
    /// Dialogue and error text changes
    Display,
    /// Agent call lifecycle
    Agent,
}

/// Lifecycle of one submitted prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    Dispatched { id: u64 },
    Replied { id: u64 },
    Failed { id: u64, error: AgentError },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Engine(EngineEvent),
    Agent(AgentEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Engine(EngineEvent::DialogueShown { .. } | EngineEvent::ErrorShown { .. }) => {
                Topic::Display
            }
            Event::Engine(_) => Topic::Movement,
            Event::Agent(_) => Topic::Agent,
        }
    }
}

/// Broadcast fan-out of runtime events.
///
/// Publishing never blocks. Slow subscribers observe `RecvError::Lagged`
/// instead of stalling the tick loop.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
