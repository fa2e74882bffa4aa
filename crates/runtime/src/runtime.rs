//! High-level runtime orchestrator.
//!
//! The runtime owns the authoritative [`GameState`], the static grid, and the
//! agent worker. Callers drive it synchronously from their frame loop: submit
//! prompts, push keyboard directions, and call [`Runtime::tick`] once per frame.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use game_content::{DEFAULT_HAZARD_TILE, MapContent};
use game_core::{
    ActionCommand, Admission, AnimationSet, CardinalDirection, EngineEvent, GameEngine, GameEnv,
    GameError, GameState, GridIndex, MotionConfig, RenderFrame, parse_reply,
};

use crate::api::{AgentRequest, EchoReplyProvider, ReplyProvider, Result, RuntimeError};
use crate::events::{AgentEvent, Event, EventBus};
use crate::workers::{AgentReply, AgentWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub motion: MotionConfig,
    /// Deadline for one agent call.
    pub agent_timeout: Duration,
    pub request_buffer: usize,
    pub event_buffer: usize,
    /// Object tile id treated as impassable when reading tile-sheet maps.
    pub hazard_tile: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            agent_timeout: Duration::from_secs(30),
            request_buffer: 32,
            event_buffer: 256,
            hazard_tile: DEFAULT_HAZARD_TILE.to_string(),
        }
    }
}

/// Tick-loop driver for one controlled entity.
pub struct Runtime {
    config: RuntimeConfig,
    grid: GridIndex,
    animations: AnimationSet,
    state: GameState,

    request_tx: mpsc::Sender<AgentRequest>,
    reply_rx: mpsc::Receiver<AgentReply>,
    request_capacity: usize,
    worker_handle: JoinHandle<()>,

    event_bus: EventBus,
    next_request_id: u64,
    pending: usize,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Dispatches `text` to the agent and returns the request id.
    ///
    /// Blank text is refused and nothing is dispatched.
    pub fn submit(&mut self, text: &str) -> Result<u64> {
        if text.trim().is_empty() {
            return Err(RuntimeError::EmptyPrompt);
        }

        let id = self.next_request_id;
        let request = AgentRequest {
            id,
            prompt: text.to_string(),
            position: self.state.position,
            bounds: self.grid.dimensions(),
        };
        self.request_tx.try_send(request).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => RuntimeError::RequestQueueFull {
                capacity: self.request_capacity,
            },
            mpsc::error::TrySendError::Closed(_) => RuntimeError::RequestChannelClosed,
        })?;

        self.next_request_id += 1;
        self.pending += 1;
        debug!(id, "prompt submitted");
        self.event_bus
            .publish(Event::Agent(AgentEvent::Dispatched { id }));
        Ok(id)
    }

    /// Keyboard path: queues `direction` unless the current cell locks it.
    pub fn push_direction(&mut self, direction: CardinalDirection) -> Admission {
        let env = GameEnv::new(&self.grid, &self.animations, &self.config.motion);
        let admission = GameEngine::new(&mut self.state).push_direction(env, direction);
        if admission == Admission::Locked {
            self.event_bus.publish(Event::Engine(EngineEvent::InputLocked {
                at: self.state.position,
                direction,
            }));
        }
        admission
    }

    /// Clears dialogue and error text.
    pub fn clear_display(&mut self) {
        GameEngine::new(&mut self.state).clear_display();
    }

    pub fn set_movement_enabled(&mut self, enabled: bool) {
        GameEngine::new(&mut self.state).set_movement_enabled(enabled);
    }

    /// Applies finished agent replies, then advances the engine by `dt`
    /// seconds. Never waits on the agent.
    pub fn tick(&mut self, dt: f32) -> RenderFrame {
        let mut events = Vec::new();
        let env = GameEnv::new(&self.grid, &self.animations, &self.config.motion);
        let mut engine = GameEngine::new(&mut self.state);

        while let Ok(reply) = self.reply_rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            let command = match reply.outcome {
                Ok(text) => {
                    self.event_bus
                        .publish(Event::Agent(AgentEvent::Replied { id: reply.id }));
                    parse_reply(&text).unwrap_or_else(|error| {
                        log_game_error("agent reply refused", &error);
                        ActionCommand::error(error.display_text())
                    })
                }
                Err(error) => {
                    let content = error.to_string();
                    self.event_bus.publish(Event::Agent(AgentEvent::Failed {
                        id: reply.id,
                        error,
                    }));
                    ActionCommand::error(content)
                }
            };
            info!(id = reply.id, %command, "agent reply applied");
            events.extend(engine.apply_command(env, command));
        }

        events.extend(engine.tick(env, dt));

        for event in events {
            if let EngineEvent::StepRejected { at, direction, reason } = &event {
                log_game_error(&format!("step {} from {} rejected", direction, at), reason);
            }
            self.event_bus.publish(Event::Engine(event));
        }

        self.state.render_frame(env)
    }

    /// Renderer snapshot without advancing time.
    pub fn frame(&self) -> RenderFrame {
        let env = GameEnv::new(&self.grid, &self.animations, &self.config.motion);
        self.state.render_frame(env)
    }

    /// Number of agent calls that have not reported back yet.
    pub fn pending_requests(&self) -> usize {
        self.pending
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Stops accepting prompts and waits for the agent worker to finish.
    ///
    /// Agent calls still in flight are aborted, so this never waits on the
    /// provider or its deadline.
    pub async fn shutdown(self) -> Result<()> {
        let Runtime {
            request_tx,
            reply_rx,
            worker_handle,
            ..
        } = self;
        drop(request_tx);
        drop(reply_rx);

        worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    grid: Option<GridIndex>,
    animations: AnimationSet,
    provider: Option<Arc<dyn ReplyProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            grid: None,
            animations: AnimationSet::default(),
            provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required movement grid
    pub fn grid(mut self, grid: GridIndex) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Take the grid from loaded map content
    pub fn map(self, map: &MapContent) -> Self {
        self.grid(map.grid.clone())
    }

    pub fn animations(mut self, animations: AnimationSet) -> Self {
        self.animations = animations;
        self
    }

    /// Set the agent reply provider (defaults to echoing the prompt)
    pub fn provider(mut self, provider: impl ReplyProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Build the runtime and spawn the agent worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let grid = self.grid.ok_or(RuntimeError::MissingGrid)?;
        let state = GameState::from_config(&grid, &self.config.motion).map_err(|error| {
            log_game_error("initial state refused", &error);
            RuntimeError::InitialState(error)
        })?;

        let buffer = self.config.request_buffer.max(1);
        let (request_tx, request_rx) = mpsc::channel::<AgentRequest>(buffer);
        let (reply_tx, reply_rx) = mpsc::channel::<AgentReply>(buffer);

        let provider = self
            .provider
            .unwrap_or_else(|| Arc::new(EchoReplyProvider));
        let worker = AgentWorker::new(provider, request_rx, reply_tx, self.config.agent_timeout);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        let dimensions = grid.dimensions();
        info!(
            "Runtime initialized: {}x{} grid, start {}, agent timeout {:?}",
            dimensions.width, dimensions.height, state.position, self.config.agent_timeout
        );
        if !state.movement_enabled {
            warn!("agent movement is disabled; move replies will be ignored");
        }

        Ok(Runtime {
            event_bus: EventBus::with_capacity(self.config.event_buffer),
            config: self.config,
            grid,
            animations: self.animations,
            state,
            request_tx,
            reply_rx,
            request_capacity: buffer,
            worker_handle,
            next_request_id: 0,
            pending: 0,
        })
    }
}

/// Logs a core error at the level its severity calls for.
fn log_game_error(context: &str, error: &impl GameError) {
    let severity = error.severity();
    if severity.is_recoverable() {
        debug!(
            code = error.error_code(),
            severity = severity.as_str(),
            "{}: {}",
            context,
            error
        );
    } else {
        warn!(
            code = error.error_code(),
            severity = severity.as_str(),
            "{}: {}",
            context,
            error
        );
    }
}
