//! Grid-walk client binary.
//!
//! Composition root: reads configuration, loads map and sprite content,
//! builds the [`runtime::Runtime`] and hands it to the terminal frame loop.
//!
//! ```bash
//! # Built-in demo map, prompts echoed back as agent replies
//! cargo run -p gridwalk-client
//!
//! # Custom map and tuning
//! GRIDWALK_MAP=assets/map.json GRIDWALK_CONFIG=gridwalk.toml cargo run -p gridwalk-client
//! ```
mod app;
mod config;
mod input;
mod logging;
mod terminal;
mod ui;

use anyhow::Result;
use game_content::{ConfigLoader, ContentConfig, MapContent, MapLoader, demo_map};
use game_core::MotionConfig;
use runtime::{EchoReplyProvider, Runtime};

use crate::app::App;
use crate::config::ClientConfig;

/// Pixel width the map is scaled to; the tile size follows from the column count.
const DESIRED_WIDTH: u32 = 800;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging(config.session_id.as_deref())?;

    let content = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => ContentConfig::default(),
    };
    let mut runtime_config = config.runtime_config(&content);
    let map = load_map(&config, &runtime_config.hazard_tile)?;
    runtime_config.motion.tile_size =
        MotionConfig::tile_size_for(map.dimensions().width, DESIRED_WIDTH);

    let runtime = Runtime::builder()
        .config(runtime_config)
        .map(&map)
        .animations(content.animations.clone())
        .provider(EchoReplyProvider)
        .build()?;

    let mut terminal = terminal::init()?;
    let _guard = terminal::TerminalGuard;

    App::new(runtime, map, content.animations)
        .run(&mut terminal)
        .await?;

    tracing::info!("Client exiting");
    Ok(())
}

fn load_map(config: &ClientConfig, hazard_tile: &str) -> Result<MapContent> {
    let Some(path) = &config.map_path else {
        tracing::info!("No map configured, using the built-in demo map");
        return Ok(demo_map());
    };

    let map = if path.extension().is_some_and(|ext| ext == "json") {
        MapLoader::load_json(path, hazard_tile)?
    } else {
        MapLoader::load(path)?
    };
    tracing::info!(
        "Loaded map {} ({}x{})",
        path.display(),
        map.dimensions().width,
        map.dimensions().height
    );
    Ok(map)
}
