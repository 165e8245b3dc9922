//! Still life demo application
//!
//! Loads the kitchen-table still life scene, prepares it against the
//! headless context and renders a few frames, logging what the shader would
//! have been given. Point a real `GraphicsContext` at the same scene file to
//! draw it on screen.

use scene_engine::prelude::*;
use scene_engine::scene::FrameStats;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application settings, read from `still_life.toml` when present
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct AppConfig {
    /// Log filter used when `RUST_LOG` is not set
    log_level: String,
    /// Scene description file
    scene_path: String,
    /// Image lookup settings
    assets: AssetConfig,
    /// Frames to render before exiting
    frames: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            scene_path: "still_life_app/scene.toml".to_string(),
            assets: AssetConfig::default(),
            frames: 3,
        }
    }
}

impl Config for AppConfig {}

/// Application-level errors
#[derive(Error, Debug)]
enum AppError {
    /// Settings file could not be read
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Scene could not be loaded or prepared
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

const CONFIG_PATH: &str = "still_life.toml";

fn load_config() -> Result<AppConfig, AppError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_string());
    if std::path::Path::new(&path).exists() {
        Ok(AppConfig::load_from_file(&path)?)
    } else {
        Ok(AppConfig::default())
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let codec = FileImageCodec::new(config.assets.clone());
    let mut scene = SceneComposer::from_file(HeadlessContext::new(), Box::new(codec), &config.scene_path)?;

    let prepared = scene.prepare()?;
    if prepared.texture_failures > 0 {
        log::warn!(
            "{} of {} textures failed to load; affected objects will sample nothing",
            prepared.texture_failures,
            scene.description().textures.len()
        );
    }

    let mut last = FrameStats::default();
    for frame in 0..config.frames {
        last = scene.render();
        log::debug!("Frame {} done", frame);
    }

    log::info!(
        "Rendered {} frames: {} objects per frame, {} unresolved tags, {} draw calls recorded",
        config.frames,
        last.objects_drawn,
        last.resolution_misses,
        scene.context().draws().len()
    );

    scene.teardown();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    scene_engine::foundation::logging::init_with_level(&config.log_level);

    log::info!("Starting still life demo with scene {}", config.scene_path);

    match run(&config) {
        Ok(()) => {
            log::info!("Still life demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Still life demo failed: {}", e);
            Err(e.into())
        }
    }
}
