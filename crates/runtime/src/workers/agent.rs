//! Agent worker that performs provider calls under a deadline.
//!
//! Receives [`AgentRequest`]s from the runtime, runs each call as its own task
//! bounded by `tokio::time::timeout`, and sends one [`AgentReply`] per request
//! back to the tick loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::api::{AgentError, AgentRequest, ReplyProvider};

/// Completed agent call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub id: u64,
    pub outcome: Result<String, AgentError>,
}

pub struct AgentWorker {
    provider: Arc<dyn ReplyProvider>,
    request_rx: mpsc::Receiver<AgentRequest>,
    reply_tx: mpsc::Sender<AgentReply>,
    timeout: Duration,
}

impl AgentWorker {
    pub fn new(
        provider: Arc<dyn ReplyProvider>,
        request_rx: mpsc::Receiver<AgentRequest>,
        reply_tx: mpsc::Sender<AgentReply>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            request_rx,
            reply_tx,
            timeout,
        }
    }

    /// Main worker loop. Ends once the request channel is closed; calls still
    /// in flight at that point are aborted and never report back.
    pub async fn run(mut self) {
        let mut in_flight = JoinSet::new();
        loop {
            tokio::select! {
                request = self.request_rx.recv() => {
                    let Some(request) = request else {
                        break;
                    };
                    debug!(id = request.id, "dispatching agent request");
                    in_flight.spawn(Self::call(
                        Arc::clone(&self.provider),
                        request,
                        self.reply_tx.clone(),
                        self.timeout,
                    ));
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        warn!("agent call task failed: {}", e);
                    }
                }
            }
        }

        if !in_flight.is_empty() {
            debug!(count = in_flight.len(), "aborting in-flight agent calls");
        }
        in_flight.shutdown().await;
        debug!("agent worker stopped");
    }

    async fn call(
        provider: Arc<dyn ReplyProvider>,
        request: AgentRequest,
        reply_tx: mpsc::Sender<AgentReply>,
        timeout: Duration,
    ) {
        let outcome = match tokio::time::timeout(timeout, provider.reply(&request)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(AgentError::from(e)),
            Err(_) => Err(AgentError::Timeout { timeout }),
        };
        if let Err(e) = &outcome {
            warn!(id = request.id, "{}", e);
        }

        let reply = AgentReply {
            id: request.id,
            outcome,
        };
        if reply_tx.send(reply).await.is_err() {
            debug!(id = request.id, "reply dropped (runtime gone)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EchoReplyProvider, ProviderError};
    use async_trait::async_trait;
    use game_core::{MapDimensions, Position};

    struct HangingProvider;

    #[async_trait]
    impl ReplyProvider for HangingProvider {
        async fn reply(&self, _request: &AgentRequest) -> Result<String, ProviderError> {
            std::future::pending().await
        }
    }

    fn request(id: u64, prompt: &str) -> AgentRequest {
        AgentRequest {
            id,
            prompt: prompt.to_string(),
            position: Position::new(0, 0),
            bounds: MapDimensions::new(4, 4),
        }
    }

    fn spawn_worker(
        provider: Arc<dyn ReplyProvider>,
        timeout: Duration,
    ) -> (
        mpsc::Sender<AgentRequest>,
        mpsc::Receiver<AgentReply>,
        tokio::task::JoinHandle<()>,
    ) {
        let (request_tx, request_rx) = mpsc::channel(4);
        let (reply_tx, reply_rx) = mpsc::channel(4);
        let worker = AgentWorker::new(provider, request_rx, reply_tx, timeout);
        (request_tx, reply_rx, tokio::spawn(worker.run()))
    }

    #[tokio::test]
    async fn replies_carry_request_id() {
        let (request_tx, mut reply_rx, handle) =
            spawn_worker(Arc::new(EchoReplyProvider), Duration::from_secs(1));

        request_tx.send(request(7, "hello")).await.unwrap();
        let reply = reply_rx.recv().await.unwrap();
        assert_eq!(
            reply,
            AgentReply {
                id: 7,
                outcome: Ok("hello".to_string())
            }
        );

        drop(request_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn hung_provider_times_out() {
        let timeout = Duration::from_millis(250);
        let (request_tx, mut reply_rx, handle) = spawn_worker(Arc::new(HangingProvider), timeout);

        request_tx.send(request(1, "anything")).await.unwrap();
        let reply = reply_rx.recv().await.unwrap();
        assert_eq!(reply.outcome, Err(AgentError::Timeout { timeout }));

        drop(request_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn closing_requests_aborts_in_flight_calls() {
        let (request_tx, mut reply_rx, handle) =
            spawn_worker(Arc::new(HangingProvider), Duration::from_secs(30));

        request_tx.send(request(3, "still thinking")).await.unwrap();
        tokio::task::yield_now().await;
        drop(request_tx);

        tokio::time::timeout(Duration::from_millis(50), handle)
            .await
            .expect("worker should stop without waiting for the deadline")
            .unwrap();
        assert_eq!(reply_rx.recv().await, None);
    }
}
