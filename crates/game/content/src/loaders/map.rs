//! Map data loader.
//!
//! Two on-disk shapes are supported. The JSON tile sheet:
//!
//! ```json
//! {
//!   "background": [["100", "100"], ["100", "100"]],
//!   "objects": [{ "type": "200", "x": 1, "y": 0 }],
//!   "lava_block": { "left": [{ "x": 0, "y": 0 }], "top": [{ "x": 1, "y": 1 }] },
//!   "counterpart": { "x": 0, "y": 1 }
//! }
//! ```
//!
//! and a terser RON form keyed by explicit dimensions:
//!
//! ```ron
//! (
//!     dimensions: (16, 7),
//!     hazards: [(3, 2)],
//!     locks: [(left, [(2, 2)]), (top, [(3, 3)])],
//!     counterpart: Some((13, 5)),
//! )
//! ```

use std::collections::HashMap;
use std::path::Path;

use game_core::{BlockingSide, GridIndex, MapDimensions, Position};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::map::{DEFAULT_HAZARD_TILE, MapContent, MapObject};

#[derive(Debug, Clone, Copy, Deserialize)]
struct CellJson {
    x: i32,
    y: i32,
}

impl From<CellJson> for Position {
    fn from(cell: CellJson) -> Self {
        Position::new(cell.x, cell.y)
    }
}

/// Tile-sheet map document.
#[derive(Debug, Clone, Deserialize)]
struct MapDataJson {
    background: Vec<Vec<String>>,
    #[serde(default)]
    objects: Vec<MapObject>,
    #[serde(default)]
    lava_block: HashMap<BlockingSide, Vec<CellJson>>,
    #[serde(default)]
    counterpart: Option<CellJson>,
}

/// Map data structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    hazards: Vec<(i32, i32)>,
    #[serde(default)]
    locks: Vec<(BlockingSide, Vec<(i32, i32)>)>,
    #[serde(default)]
    counterpart: Option<(i32, i32)>,
}

/// Loader for map data from JSON or RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map, choosing the format from the file extension.
    pub fn load(path: &Path) -> LoadResult<MapContent> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::load_json(path, DEFAULT_HAZARD_TILE),
            Some("ron") => Self::load_ron(path),
            _ => Err(anyhow::anyhow!(
                "Unsupported map format for {} (expected .json or .ron)",
                path.display()
            )),
        }
    }

    /// Load a JSON tile sheet. Objects of type `hazard_tile` become impassable.
    pub fn load_json(path: &Path, hazard_tile: &str) -> LoadResult<MapContent> {
        let content = read_file(path)?;
        Self::parse_json(&content, hazard_tile)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    pub fn load_ron(path: &Path) -> LoadResult<MapContent> {
        let content = read_file(path)?;
        Self::parse_ron(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    pub fn parse_json(content: &str, hazard_tile: &str) -> LoadResult<MapContent> {
        let data: MapDataJson = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map JSON: {}", e))?;

        let height = data.background.len();
        let width = data.background.first().map_or(0, Vec::len);
        if data.background.iter().any(|row| row.len() != width) {
            anyhow::bail!("Background rows must all have {} columns", width);
        }

        let dimensions = MapDimensions::new(width as u32, height as u32);
        let hazards = data
            .objects
            .iter()
            .filter(|object| object.kind == hazard_tile)
            .map(MapObject::position);

        let mut builder = GridIndex::builder(dimensions)
            .occupied_cells(hazards)
            .counterpart(data.counterpart.map(Position::from));
        for (side, cells) in data.lava_block {
            builder = builder.locks(side, cells.into_iter().map(Position::from));
        }

        Ok(MapContent {
            grid: builder.build(),
            background: data.background,
            objects: data.objects,
        })
    }

    /// Parse a RON map. The background is filled with plain floor tiles.
    pub fn parse_ron(content: &str) -> LoadResult<MapContent> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let (width, height) = data.dimensions;
        let dimensions = MapDimensions::new(width, height);
        let hazards: Vec<Position> = data
            .hazards
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect();

        let mut builder = GridIndex::builder(dimensions)
            .occupied_cells(hazards.iter().copied())
            .counterpart(data.counterpart.map(|(x, y)| Position::new(x, y)));
        for (side, cells) in data.locks {
            builder = builder.locks(side, cells.into_iter().map(|(x, y)| Position::new(x, y)));
        }

        let background = (0..height)
            .map(|_| vec!["100".to_string(); width as usize])
            .collect();
        let objects = hazards
            .into_iter()
            .map(|cell| MapObject {
                kind: DEFAULT_HAZARD_TILE.to_string(),
                x: cell.x,
                y: cell.y,
            })
            .collect();

        Ok(MapContent {
            grid: builder.build(),
            background,
            objects,
        })
    }
}
