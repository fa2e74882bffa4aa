use crate::state::Position;

/// Motion and animation tuning shared by the engine stages.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Edge length of one grid cell in pixels.
    pub tile_size: f32,
    /// Linear transit speed in pixels per second.
    pub move_speed: f32,
    /// Seconds between walking frames.
    pub anim_interval: f32,
    /// Seconds the residual pose stays on screen after a transit ends.
    pub idle_delay: f32,
    /// Grid cell the entity occupies when the session starts.
    pub start: Position,
    /// Whether agent `move` replies are expanded into queued steps.
    pub movement_enabled: bool,
}

impl MotionConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TILE_SIZE: f32 = 50.0;
    pub const DEFAULT_MOVE_SPEED: f32 = 200.0;
    pub const DEFAULT_ANIM_INTERVAL: f32 = 0.02;
    pub const DEFAULT_IDLE_DELAY: f32 = 0.8;
    pub const DEFAULT_START: Position = Position { x: 1, y: 2 };

    pub fn new() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            anim_interval: Self::DEFAULT_ANIM_INTERVAL,
            idle_delay: Self::DEFAULT_IDLE_DELAY,
            start: Self::DEFAULT_START,
            movement_enabled: true,
        }
    }

    /// Whole-pixel tile size that fits `columns` cells into `desired_width`.
    ///
    /// Returns `0.0` for an empty map.
    pub fn tile_size_for(columns: u32, desired_width: u32) -> f32 {
        if columns == 0 {
            return 0.0;
        }
        (desired_width / columns) as f32
    }

    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn with_start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    pub fn with_movement_enabled(mut self, enabled: bool) -> Self {
        self.movement_enabled = enabled;
        self
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_size_matches_reference_layout() {
        // 16 columns squeezed into an 800px window
        assert_eq!(MotionConfig::tile_size_for(16, 800), 50.0);
        assert_eq!(MotionConfig::tile_size_for(7, 800), 114.0);
        assert_eq!(MotionConfig::tile_size_for(0, 800), 0.0);
    }

    #[test]
    fn defaults_follow_constants() {
        let config = MotionConfig::default();
        assert_eq!(config.tile_size, MotionConfig::DEFAULT_TILE_SIZE);
        assert_eq!(config.start, Position::new(1, 2));
        assert!(config.movement_enabled);
    }
}
