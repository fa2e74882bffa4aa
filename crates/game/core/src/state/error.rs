//! State construction errors.

use crate::env::MapDimensions;
use crate::state::Position;

/// Reasons a [`crate::GameState`] cannot be placed on a map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("start {position} is out of bounds (map size: {}x{})", dimensions.width, dimensions.height)]
    StartOutOfBounds {
        position: Position,
        dimensions: MapDimensions,
    },

    #[error("start {position} is on an impassable cell")]
    StartBlocked { position: Position },
}
