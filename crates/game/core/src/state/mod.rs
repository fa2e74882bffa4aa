//! Authoritative mutable state of the controlled entity.
//!
//! Everything the tick loop mutates lives in [`GameState`]: the logical grid
//! cell, the step queue, the interpolated screen position, the animation
//! timers and the dialogue/error surfaces. Runtime layers own one instance and
//! mutate it exclusively through [`crate::GameEngine`].
mod error;
pub mod types;

pub use error::StateError;
pub use types::{PixelPosition, Position};

use crate::action::MovementQueue;
use crate::config::MotionConfig;
use crate::engine::{AnimationFsm, Interpolator, TransitState};
use crate::env::GridIndex;

/// Dialogue line and the cell it is drawn next to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialogue {
    pub content: String,
    pub anchor: Option<Position>,
}

/// Text surfaces polled by the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub dialogue: Option<Dialogue>,
    pub error: Option<String>,
}

impl DisplayState {
    pub fn clear(&mut self) {
        self.dialogue = None;
        self.error = None;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Logical cell; changes only when a step is accepted.
    pub position: Position,
    pub queue: MovementQueue,
    pub motion: Interpolator,
    pub animation: AnimationFsm,
    pub display: DisplayState,
    /// Gate for agent `move` replies. Keyboard input is not affected.
    pub movement_enabled: bool,
}

impl GameState {
    /// Places a resting entity on `start`.
    pub fn new(start: Position, grid: &GridIndex, motion: &MotionConfig) -> Result<Self, StateError> {
        let dimensions = grid.dimensions();
        if !grid.is_in_bounds(start) {
            return Err(StateError::StartOutOfBounds {
                position: start,
                dimensions,
            });
        }
        if grid.is_blocked(start) {
            return Err(StateError::StartBlocked { position: start });
        }

        let pixel = PixelPosition::of_cell(start, dimensions.height, motion.tile_size);
        Ok(Self {
            position: start,
            queue: MovementQueue::new(),
            motion: Interpolator::at(pixel),
            animation: AnimationFsm::new(),
            display: DisplayState::default(),
            movement_enabled: motion.movement_enabled,
        })
    }

    /// Places the entity on the configured start cell.
    pub fn from_config(grid: &GridIndex, motion: &MotionConfig) -> Result<Self, StateError> {
        Self::new(motion.start, grid, motion)
    }

    pub fn transit(&self) -> TransitState {
        self.motion.transit()
    }

    pub fn is_idle(&self) -> bool {
        !self.motion.is_transiting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapDimensions;

    #[test]
    fn spawns_resting_at_start() {
        let grid = GridIndex::new(MapDimensions::new(16, 7));
        let state = GameState::from_config(&grid, &MotionConfig::default()).unwrap();
        assert_eq!(state.position, Position::new(1, 2));
        assert_eq!(state.motion.position(), PixelPosition::new(50.0, 200.0));
        assert!(state.is_idle());
        assert!(state.queue.is_empty());
    }

    #[test]
    fn rejects_invalid_start() {
        let grid = GridIndex::builder(MapDimensions::new(4, 4))
            .occupied(Position::new(1, 1))
            .build();
        let motion = MotionConfig::default();

        assert!(matches!(
            GameState::new(Position::new(4, 0), &grid, &motion),
            Err(StateError::StartOutOfBounds { .. })
        ));
        assert_eq!(
            GameState::new(Position::new(1, 1), &grid, &motion),
            Err(StateError::StartBlocked {
                position: Position::new(1, 1)
            })
        );
    }
}
