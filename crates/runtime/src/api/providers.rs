//! Asynchronous abstraction for sourcing agent replies.
//!
//! Runtime users plug in [`ReplyProvider`] implementations so the same tick
//! loop can talk to a remote model, echo typed text, or replay fixtures.
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use game_core::{MapDimensions, Position};
use tokio::sync::Mutex;

use super::errors::ProviderError;

/// Context handed to a provider for one submitted prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentRequest {
    pub id: u64,
    pub prompt: String,
    /// Logical cell of the entity when the prompt was submitted.
    pub position: Position,
    pub bounds: MapDimensions,
}

/// Trait for turning a prompt into raw reply text.
///
/// The returned text is interpreted by [`game_core::interpret`]; providers
/// do not need to validate it.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn reply(&self, request: &AgentRequest) -> Result<String, ProviderError>;
}

/// Returns the prompt verbatim, so a structured reply can be typed by hand.
pub struct EchoReplyProvider;

#[async_trait]
impl ReplyProvider for EchoReplyProvider {
    async fn reply(&self, request: &AgentRequest) -> Result<String, ProviderError> {
        Ok(request.prompt.clone())
    }
}

/// Replays canned replies in FIFO order, ignoring the prompt.
pub struct ScriptedReplyProvider {
    replies: Mutex<VecDeque<String>>,
    delay: Option<Duration>,
}

impl ScriptedReplyProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            delay: None,
        }
    }

    /// Sleeps for `delay` before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ReplyProvider for ScriptedReplyProvider {
    async fn reply(&self, _request: &AgentRequest) -> Result<String, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .await
            .pop_front()
            .ok_or(ProviderError::Exhausted)
    }
}
