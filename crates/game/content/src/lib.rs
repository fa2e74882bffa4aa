//! Data-driven content definitions and loaders.
//!
//! This crate houses static map content and provides loaders for data files:
//! - Map layouts (the JSON tile-sheet format, or RON)
//! - Motion tuning and sprite frame tables (TOML)
//!
//! Content is loaded once before the tick loop starts and never appears in
//! mutable game state.

pub mod map;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use map::{DEFAULT_HAZARD_TILE, FLOOR_TILE, MapContent, MapObject, demo_map};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentConfig, MapLoader};
