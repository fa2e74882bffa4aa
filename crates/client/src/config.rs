//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use game_content::ContentConfig;
use runtime::RuntimeConfig;

/// Environment-level overrides layered on top of the content config.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Map file (`.json` tile sheet or `.ron`); the demo map when unset.
    pub map_path: Option<PathBuf>,
    /// TOML motion/sprite overrides.
    pub config_path: Option<PathBuf>,
    pub agent_timeout: Option<Duration>,
    pub movement_enabled: Option<bool>,
    pub hazard_tile: Option<String>,
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GRIDWALK_MAP` - Map file path
    /// - `GRIDWALK_CONFIG` - TOML config path
    /// - `GRIDWALK_HAZARD_TILE` - Object tile id treated as impassable (default: 200)
    /// - `AGENT_TIMEOUT_MS` - Agent call deadline in milliseconds
    /// - `MOVEMENT_ENABLED` - Whether agent `move` replies are obeyed
    /// - `GAME_SESSION_ID` - Log directory name for this session
    pub fn from_env() -> Self {
        Self {
            map_path: read_env("GRIDWALK_MAP"),
            config_path: read_env("GRIDWALK_CONFIG"),
            agent_timeout: read_env::<u64>("AGENT_TIMEOUT_MS").map(Duration::from_millis),
            movement_enabled: env::var("MOVEMENT_ENABLED")
                .ok()
                .and_then(|value| parse_bool(&value)),
            hazard_tile: read_env("GRIDWALK_HAZARD_TILE"),
            session_id: read_env("GAME_SESSION_ID"),
        }
    }

    /// Runtime configuration: defaults, then the content file, then env.
    pub fn runtime_config(&self, content: &ContentConfig) -> RuntimeConfig {
        let mut config = RuntimeConfig {
            motion: content.motion.clone(),
            ..RuntimeConfig::default()
        };
        if let Some(timeout) = self.agent_timeout {
            config.agent_timeout = timeout;
        }
        if let Some(enabled) = self.movement_enabled {
            config.motion.movement_enabled = enabled;
        }
        if let Some(tile) = &self.hazard_tile {
            config.hazard_tile = tile.clone();
        }
        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
