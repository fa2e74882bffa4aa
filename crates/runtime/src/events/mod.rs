//! Event bus for runtime events.
//!
//! Engine events and agent call lifecycle events share one broadcast channel;
//! consumers filter by [`Topic`].

mod bus;

pub use bus::{AgentEvent, Event, EventBus, Topic};
