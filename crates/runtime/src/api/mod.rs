//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod providers;

pub use errors::{AgentError, ProviderError, Result, RuntimeError};
pub use providers::{AgentRequest, EchoReplyProvider, ReplyProvider, ScriptedReplyProvider};
