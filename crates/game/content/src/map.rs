//! Static map content: the grid index plus the tile sheet the renderer draws.

use game_core::{BlockingSide, GridIndex, MapDimensions, Position};
use serde::{Deserialize, Serialize};

/// Object tile id treated as an impassable hazard.
pub const DEFAULT_HAZARD_TILE: &str = "200";

/// Plain floor tile drawn under objects and under the entity.
pub const FLOOR_TILE: &str = "000";

/// Object placed on top of the background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i32,
    pub y: i32,
}

impl MapObject {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Loaded map: movement geometry plus draw data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapContent {
    pub grid: GridIndex,
    /// Background tile ids; `background[0]` is the bottom row (y = 0).
    pub background: Vec<Vec<String>>,
    pub objects: Vec<MapObject>,
}

impl MapContent {
    pub fn dimensions(&self) -> MapDimensions {
        self.grid.dimensions()
    }

    /// Tile id drawn at `position`: the object on it, else the background.
    pub fn tile_at(&self, position: Position) -> Option<&str> {
        if let Some(object) = self.objects.iter().find(|o| o.position() == position) {
            return Some(object.kind.as_str());
        }
        let row = self.background.get(usize::try_from(position.y).ok()?)?;
        row.get(usize::try_from(position.x).ok()?).map(String::as_str)
    }
}

/// Built-in 16x7 map used when no map file is configured.
///
/// Three hazard tiles, each ringed by the lock cells that refuse stepping
/// toward it.
pub fn demo_map() -> MapContent {
    let dimensions = MapDimensions::new(16, 7);
    let hazards = [Position::new(3, 2), Position::new(7, 4), Position::new(11, 1)];

    let mut builder = GridIndex::builder(dimensions)
        .occupied_cells(hazards)
        .counterpart(Some(Position::new(13, 5)));
    for hazard in hazards {
        builder = builder
            .lock(BlockingSide::Left, Position::new(hazard.x - 1, hazard.y))
            .lock(BlockingSide::Right, Position::new(hazard.x + 1, hazard.y))
            .lock(BlockingSide::Top, Position::new(hazard.x, hazard.y + 1))
            .lock(BlockingSide::Bottom, Position::new(hazard.x, hazard.y - 1));
    }

    let background = (0..dimensions.height)
        .map(|_| vec!["100".to_string(); dimensions.width as usize])
        .collect();
    let objects = hazards
        .iter()
        .map(|hazard| MapObject {
            kind: DEFAULT_HAZARD_TILE.to_string(),
            x: hazard.x,
            y: hazard.y,
        })
        .collect();

    MapContent {
        grid: builder.build(),
        background,
        objects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::CardinalDirection;

    #[test]
    fn demo_map_matches_reference_size() {
        let map = demo_map();
        assert_eq!(map.dimensions(), MapDimensions::new(16, 7));
        assert!(map.grid.is_blocked(Position::new(3, 2)));
        assert!(map.grid.is_direction_locked(Position::new(2, 2), CardinalDirection::East));
        assert!(map.grid.is_direction_locked(Position::new(3, 3), CardinalDirection::South));
        assert!(!map.grid.is_blocked(Position::new(1, 2)));
    }

    #[test]
    fn tile_lookup_prefers_objects() {
        let map = demo_map();
        assert_eq!(map.tile_at(Position::new(3, 2)), Some(DEFAULT_HAZARD_TILE));
        assert_eq!(map.tile_at(Position::new(0, 0)), Some("100"));
        assert_eq!(map.tile_at(Position::new(-1, 0)), None);
        assert_eq!(map.tile_at(Position::new(0, 7)), None);
    }
}
