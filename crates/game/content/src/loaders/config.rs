//! Motion tuning and sprite table loader.
//!
//! ```toml
//! [motion]
//! move_speed = 200.0
//! idle_delay = 0.8
//!
//! [sprites]
//! idle = "300"
//! north = ["310", "311"]
//! ```
//!
//! Missing keys keep their defaults. An explicitly empty cycle unregisters the
//! direction so the idle pose is drawn while walking that way.

use std::path::Path;

use game_core::{AnimationSet, CardinalDirection, FrameId, MotionConfig};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Settings read from a content config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentConfig {
    pub motion: MotionConfig,
    pub animations: AnimationSet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    motion: MotionConfig,
    sprites: SpriteTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpriteTable {
    idle: Option<String>,
    north: Option<Vec<String>>,
    east: Option<Vec<String>>,
    west: Option<Vec<String>>,
    south: Option<Vec<String>>,
}

impl SpriteTable {
    fn apply(self, animations: &mut AnimationSet) {
        if let Some(idle) = self.idle {
            animations.set_idle(FrameId::new(idle));
        }
        let cycles = [
            (CardinalDirection::North, self.north),
            (CardinalDirection::East, self.east),
            (CardinalDirection::West, self.west),
            (CardinalDirection::South, self.south),
        ];
        for (direction, frames) in cycles {
            if let Some(frames) = frames {
                animations.set_cycle(direction, frames.into_iter().map(FrameId::new).collect());
            }
        }
    }
}

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<ContentConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ContentConfig> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if file.motion.move_speed <= 0.0 {
            anyhow::bail!("motion.move_speed must be positive, got {}", file.motion.move_speed);
        }
        if file.motion.anim_interval <= 0.0 {
            anyhow::bail!(
                "motion.anim_interval must be positive, got {}",
                file.motion.anim_interval
            );
        }

        let mut animations = AnimationSet::reference();
        file.sprites.apply(&mut animations);

        Ok(ContentConfig {
            motion: file.motion,
            animations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Position;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, ContentConfig::default());
    }

    #[test]
    fn overrides_motion_and_sprites() {
        let config = ConfigLoader::parse(
            r#"
            [motion]
            move_speed = 400.0
            start = { x = 0, y = 0 }
            movement_enabled = false

            [sprites]
            idle = "900"
            east = ["901", "902", "903"]
            west = []
            "#,
        )
        .unwrap();

        assert_eq!(config.motion.move_speed, 400.0);
        assert_eq!(config.motion.start, Position::new(0, 0));
        assert!(!config.motion.movement_enabled);
        assert_eq!(config.motion.idle_delay, MotionConfig::default().idle_delay);

        assert_eq!(config.animations.idle().as_str(), "900");
        assert_eq!(config.animations.cycle(CardinalDirection::East).map(<[_]>::len), Some(3));
        assert!(config.animations.cycle(CardinalDirection::West).is_none());
        assert_eq!(config.animations.cycle(CardinalDirection::North).map(<[_]>::len), Some(2));
    }

    #[test]
    fn rejects_non_positive_speed() {
        assert!(ConfigLoader::parse("[motion]\nmove_speed = 0.0\n").is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gridwalk.toml");
        std::fs::write(&path, "[motion]\nidle_delay = 1.5\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.motion.idle_delay, 1.5);
        assert!(ConfigLoader::load(&dir.path().join("absent.toml")).is_err());
    }
}
