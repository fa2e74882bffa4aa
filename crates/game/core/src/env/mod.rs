//! Read-only world data consulted by the engine every tick.
//!
//! Map geometry, the sprite frame table and motion tuning are loaded once
//! before the loop starts. The [`GameEnv`] aggregate bundles borrowed views of
//! them so the engine never owns or mutates static content.
mod map;

pub use map::{BlockingSide, GridIndex, GridIndexBuilder, MapDimensions};

use crate::config::MotionConfig;
use crate::engine::AnimationSet;

/// Borrowed bundle of static content required by [`crate::GameEngine`].
#[derive(Clone, Copy, Debug)]
pub struct GameEnv<'a> {
    grid: &'a GridIndex,
    animations: &'a AnimationSet,
    motion: &'a MotionConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(grid: &'a GridIndex, animations: &'a AnimationSet, motion: &'a MotionConfig) -> Self {
        Self {
            grid,
            animations,
            motion,
        }
    }

    pub fn grid(&self) -> &'a GridIndex {
        self.grid
    }

    pub fn animations(&self) -> &'a AnimationSet {
        self.animations
    }

    pub fn motion(&self) -> &'a MotionConfig {
        self.motion
    }
}
