use std::collections::{HashMap, HashSet};

use crate::action::CardinalDirection;
use crate::state::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Named blocking set of a hazard-adjacent cell.
///
/// The side names the world side the entity is pinned against; the refused
/// direction is the one that would walk back across that side. `Left` refuses
/// east, `Right` refuses west, `Top` refuses south and `Bottom` refuses north.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlockingSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl BlockingSide {
    pub const ALL: [BlockingSide; 4] = [
        BlockingSide::Left,
        BlockingSide::Right,
        BlockingSide::Top,
        BlockingSide::Bottom,
    ];

    /// Direction refused while standing on a cell of this set.
    pub const fn refused(self) -> CardinalDirection {
        match self {
            BlockingSide::Left => CardinalDirection::East,
            BlockingSide::Right => CardinalDirection::West,
            BlockingSide::Top => CardinalDirection::South,
            BlockingSide::Bottom => CardinalDirection::North,
        }
    }

    /// Inverse of [`BlockingSide::refused`].
    pub const fn refusing(direction: CardinalDirection) -> Self {
        match direction {
            CardinalDirection::East => BlockingSide::Left,
            CardinalDirection::West => BlockingSide::Right,
            CardinalDirection::South => BlockingSide::Top,
            CardinalDirection::North => BlockingSide::Bottom,
        }
    }
}

/// Static per-map geometry: bounds, impassable cells and directional locks.
///
/// Built once before the tick loop starts and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridIndex {
    dimensions: MapDimensions,
    occupied: HashSet<Position>,
    locks: HashMap<BlockingSide, HashSet<Position>>,
    counterpart: Option<Position>,
}

impl GridIndex {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            occupied: HashSet::new(),
            locks: HashMap::new(),
            counterpart: None,
        }
    }

    pub fn builder(dimensions: MapDimensions) -> GridIndexBuilder {
        GridIndexBuilder {
            grid: Self::new(dimensions),
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn is_in_bounds(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.occupied.contains(&position)
    }

    pub fn is_direction_locked(&self, position: Position, direction: CardinalDirection) -> bool {
        self.locks
            .get(&BlockingSide::refusing(direction))
            .is_some_and(|cells| cells.contains(&position))
    }

    /// Cell of the conversational counterpart, used to anchor dialogue.
    pub fn counterpart(&self) -> Option<Position> {
        self.counterpart
    }
}

pub struct GridIndexBuilder {
    grid: GridIndex,
}

impl GridIndexBuilder {
    pub fn occupied(mut self, position: Position) -> Self {
        self.grid.occupied.insert(position);
        self
    }

    pub fn occupied_cells(mut self, cells: impl IntoIterator<Item = Position>) -> Self {
        self.grid.occupied.extend(cells);
        self
    }

    pub fn lock(mut self, side: BlockingSide, position: Position) -> Self {
        self.grid.locks.entry(side).or_default().insert(position);
        self
    }

    pub fn locks(mut self, side: BlockingSide, cells: impl IntoIterator<Item = Position>) -> Self {
        self.grid.locks.entry(side).or_default().extend(cells);
        self
    }

    pub fn counterpart(mut self, position: Option<Position>) -> Self {
        self.grid.counterpart = position;
        self
    }

    pub fn build(self) -> GridIndex {
        self.grid
    }
}
