//! Deterministic grid movement and agent action protocol.
//!
//! `game-core` defines the canonical rules for a single tile-grid character:
//! the step queue with per-cell directional locks, the continuous interpolation
//! between cells, the animation state machine, and the translation of an
//! agent's structured reply into a closed [`ActionCommand`]. All state
//! mutation flows through [`engine::GameEngine`]; the crate performs no I/O.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    ActionCommand, CardinalDirection, MAX_REPEAT, MoveStep, MovementQueue, ReplyError,
    StepOutcome, StepRejection, interpret, parse_reply, strip_fences,
};
pub use config::MotionConfig;
pub use engine::{
    Admission, AnimationFsm, AnimationSet, AnimationState, EngineEvent, FrameId, GameEngine,
    Interpolator, RenderFrame, TransitState,
};
pub use env::{BlockingSide, GameEnv, GridIndex, GridIndexBuilder, MapDimensions};
pub use error::{ErrorSeverity, GameError};
pub use state::{Dialogue, DisplayState, GameState, PixelPosition, Position, StateError};
