//! Worker tasks that back the runtime orchestration.
//!
//! The agent worker performs provider calls off the tick loop so a slow or
//! hung agent never stalls movement or rendering.

mod agent;

pub use agent::{AgentReply, AgentWorker};
