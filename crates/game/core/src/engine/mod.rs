//! Per-tick movement pipeline.
//!
//! The [`GameEngine`] is the only writer of [`GameState`]. Each tick it
//! resolves at most one queued step against the grid, advances the
//! interpolator and then the animation state machine, in that order.

mod animation;
mod interpolator;

pub use animation::{AnimationFsm, AnimationSet, AnimationState, FrameId};
pub use interpolator::{Interpolator, TransitState};

use crate::action::{ActionCommand, CardinalDirection, StepOutcome, StepRejection};
use crate::env::GameEnv;
use crate::state::{Dialogue, GameState, PixelPosition, Position};

/// Notable state changes emitted by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    StepAccepted {
        from: Position,
        to: Position,
        direction: CardinalDirection,
    },
    StepRejected {
        at: Position,
        direction: CardinalDirection,
        reason: StepRejection,
    },
    TransitFinished {
        at: Position,
    },
    /// Keyboard request refused before reaching the queue.
    InputLocked {
        at: Position,
        direction: CardinalDirection,
    },
    StepsQueued {
        count: usize,
    },
    /// `move` reply dropped because movement is disabled.
    MoveIgnored {
        steps: usize,
    },
    DialogueShown {
        content: String,
    },
    ErrorShown {
        content: String,
    },
}

/// Result of offering a direction to the queue from direct input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Queued,
    Locked,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub pixel: PixelPosition,
    pub frame: FrameId,
    pub grid_position: Position,
    pub transiting: bool,
    pub queued: usize,
    pub dialogue: Option<Dialogue>,
    pub error: Option<String>,
}

pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Queues a direction from direct input unless the current cell locks it.
    pub fn push_direction(&mut self, env: GameEnv<'_>, direction: CardinalDirection) -> Admission {
        if env
            .grid()
            .is_direction_locked(self.state.position, direction)
        {
            return Admission::Locked;
        }
        self.state.queue.push(direction);
        Admission::Queued
    }

    /// Applies an interpreted agent reply.
    ///
    /// A valid `move` or `talk` clears the previous error text. `move` replies
    /// are dropped silently when movement is disabled.
    pub fn apply_command(&mut self, env: GameEnv<'_>, command: ActionCommand) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        match command {
            ActionCommand::Move { .. } => {
                self.state.display.error = None;
                let count = command.expand().count();
                if !self.state.movement_enabled {
                    events.push(EngineEvent::MoveIgnored { steps: count });
                    return events;
                }
                for direction in command.expand() {
                    self.state.queue.push(direction);
                }
                events.push(EngineEvent::StepsQueued { count });
            }
            ActionCommand::Talk { content } => {
                self.state.display.error = None;
                self.state.display.dialogue = Some(Dialogue {
                    content: content.clone(),
                    anchor: env.grid().counterpart(),
                });
                events.push(EngineEvent::DialogueShown { content });
            }
            ActionCommand::Error { content } => {
                self.state.display.error = Some(content.clone());
                events.push(EngineEvent::ErrorShown { content });
            }
        }
        events
    }

    /// Advances the simulation by `dt` seconds.
    pub fn tick(&mut self, env: GameEnv<'_>, dt: f32) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let motion = env.motion();

        if self.state.is_idle()
            && let Some(outcome) = self.state.queue.try_advance(self.state.position, env.grid())
        {
            events.push(self.commit(env, outcome));
        }

        if self.state.motion.tick(dt, motion.move_speed) {
            events.push(EngineEvent::TransitFinished {
                at: self.state.position,
            });
        }

        let transiting = self.state.motion.is_transiting();
        self.state
            .animation
            .tick(dt, transiting, env.animations(), motion);

        events
    }

    fn commit(&mut self, env: GameEnv<'_>, outcome: StepOutcome) -> EngineEvent {
        let from = self.state.position;
        match outcome {
            StepOutcome::Accepted {
                direction,
                destination,
            } => {
                let rows = env.grid().dimensions().height;
                let target_pixel =
                    PixelPosition::of_cell(destination, rows, env.motion().tile_size);
                self.state.position = destination;
                self.state
                    .motion
                    .begin(direction, destination, target_pixel);
                self.state.animation.begin(direction);
                EngineEvent::StepAccepted {
                    from,
                    to: destination,
                    direction,
                }
            }
            StepOutcome::Rejected { direction, reason } => EngineEvent::StepRejected {
                at: from,
                direction,
                reason,
            },
        }
    }

    /// Clears the dialogue and error surfaces.
    pub fn clear_display(&mut self) {
        self.state.display.clear();
    }

    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.state.movement_enabled = enabled;
    }
}

impl GameState {
    /// Snapshot of the renderer-facing outputs.
    pub fn render_frame(&self, env: GameEnv<'_>) -> RenderFrame {
        RenderFrame {
            pixel: self.motion.position(),
            frame: self.animation.current_frame(env.animations()).clone(),
            grid_position: self.position,
            transiting: self.motion.is_transiting(),
            queued: self.queue.len(),
            dialogue: self.display.dialogue.clone(),
            error: self.display.error.clone(),
        }
    }
}
