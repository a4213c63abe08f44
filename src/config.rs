//! Runtime configuration.
//!
//! Layered: built-in defaults, then an optional JSON file named by
//! `PLATFORMER_CONFIG`, then individual environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::TileMap;
use crate::types::TARGET_FPS;

/// The level shipped with the game, used when no map path is configured.
pub const BUNDLED_LEVEL: &str = include_str!("../levels/level1.txt");

pub const ENV_CONFIG: &str = "PLATFORMER_CONFIG";
pub const ENV_MAP: &str = "PLATFORMER_MAP";
pub const ENV_FPS: &str = "PLATFORMER_FPS";
pub const ENV_KEY_RELEASE_MS: &str = "PLATFORMER_KEY_RELEASE_MS";
pub const ENV_LOG_PATH: &str = "PLATFORMER_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Level file; the bundled level when unset.
    pub map_path: Option<PathBuf>,
    /// Target frame rate of the frame limiter.
    pub fps: u32,
    /// Auto-release delay for terminals that never report key releases.
    pub key_release_ms: u32,
    /// Log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_path: None,
            fps: TARGET_FPS,
            key_release_ms: 150,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Defaults, then the `PLATFORMER_CONFIG` file, then the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = match non_empty(std::env::var(ENV_CONFIG).ok()) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    /// Parse a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        config.sanitize();
        Ok(config)
    }

    /// Apply overrides from `lookup` (usually the process environment).
    ///
    /// Unparseable numbers are ignored; blank paths clear the setting.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_MAP) {
            self.map_path = non_empty(Some(v)).map(PathBuf::from);
        }
        if let Some(fps) = lookup(ENV_FPS).and_then(|s| s.trim().parse().ok()) {
            self.fps = fps;
        }
        if let Some(ms) = lookup(ENV_KEY_RELEASE_MS).and_then(|s| s.trim().parse().ok()) {
            self.key_release_ms = ms;
        }
        if let Some(v) = lookup(ENV_LOG_PATH) {
            self.log_path = non_empty(Some(v)).map(PathBuf::from);
        }
        self.sanitize();
    }

    /// Load the configured map, or the bundled level.
    pub fn load_map(&self) -> Result<TileMap> {
        match &self.map_path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("read map {}", path.display()))?;
                TileMap::parse(&text).with_context(|| format!("parse map {}", path.display()))
            }
            None => TileMap::parse(BUNDLED_LEVEL).context("parse bundled level"),
        }
    }

    fn sanitize(&mut self) {
        if self.fps == 0 {
            log::warn!("fps must be positive, using {}", TARGET_FPS);
            self.fps = TARGET_FPS;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
