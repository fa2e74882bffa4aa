//! Unified error types surfaced by the runtime API.
//!
//! [`RuntimeError`] covers the caller-facing operations, while
//! [`ProviderError`] and [`AgentError`] describe failed agent calls. Agent
//! failures never reach the caller as `Err`; they are turned into error text
//! on the display surface during the next tick.
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("agent request channel closed")]
    RequestChannelClosed,

    #[error("agent request queue is full ({capacity} pending)")]
    RequestQueueFull { capacity: usize },

    #[error("agent worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a grid before building")]
    MissingGrid,

    #[error("failed to place the entity on its start cell")]
    InitialState(#[source] game_core::StateError),
}

/// Failure reported by a [`crate::ReplyProvider`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("no scripted replies left")]
    Exhausted,
}

/// External call failure: the agent did not produce a reply text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("agent timed out after {} ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("agent call failed: {0}")]
    Provider(#[from] ProviderError),
}
