//! Runtime orchestration for the grid-walking character.
//!
//! This crate wires the reply provider abstraction, the agent worker, and the
//! event bus around the pure `game-core` engine. Consumers embed [`Runtime`]
//! in their frame loop: submit prompts, forward keyboard directions, and call
//! [`Runtime::tick`] once per frame to obtain a [`game_core::RenderFrame`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the broadcast event bus
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    AgentError, AgentRequest, EchoReplyProvider, ProviderError, ReplyProvider, Result,
    RuntimeError, ScriptedReplyProvider,
};
pub use events::{AgentEvent, Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::AgentReply;
