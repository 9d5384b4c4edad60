//! Demo configuration, loaded from JSON. Every field is optional; anything
//! left out falls back to the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sqd_core::fps_cap::FpsCap;
use sqd_platform::PlatformConfig;

use crate::cursor::CursorConfig;
use crate::player::PlayerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config validation failed: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub font_size: f32,
    pub visible: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
    /// Caps cycled by the `1` key; the first entry is active at startup.
    /// `0` means uncapped.
    pub fps_caps: Vec<u32>,
    /// Enables the `1` hotkey and the cap lines on the HUD.
    pub fps_cap_hotkey: bool,
    pub background: [u8; 3],
    pub player: PlayerConfig,
    pub cursor: CursorConfig,
    pub hud: HudConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Square Demo".to_string(),
            width: 1280,
            height: 720,
            resizable: false,
            vsync: true,
            fps_caps: FpsCap::DEFAULT_CHOICES.to_vec(),
            fps_cap_hotkey: true,
            background: [10, 10, 10],
            player: PlayerConfig::default(),
            cursor: CursorConfig::default(),
            hud: HudConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            resizable: self.resizable,
            hide_cursor: true,
        }
    }

    pub fn fps_cap(&self) -> FpsCap {
        FpsCap::new(self.fps_caps.clone()).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: String| Err(ConfigError::Invalid(msg));
        if self.width == 0 || self.height == 0 {
            return fail(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if self.fps_caps.is_empty() {
            return fail("fps_caps must list at least one cap".to_string());
        }
        if !self.fps_cap_hotkey && self.fps_caps.len() > 1 {
            log::warn!(
                "fps_caps lists {} caps but fps_cap_hotkey is off; only {} will be used",
                self.fps_caps.len(),
                self.fps_caps[0]
            );
        }
        if !(self.player.size > 0.0) {
            return fail(format!("player.size must be > 0, got {}", self.player.size));
        }
        if !(self.player.speed >= 0.0) {
            return fail(format!(
                "player.speed must be >= 0, got {}",
                self.player.speed
            ));
        }
        if !(self.cursor.size > 0.0) {
            return fail(format!("cursor.size must be > 0, got {}", self.cursor.size));
        }
        if !(self.hud.font_size > 0.0) {
            return fail(format!(
                "hud.font_size must be > 0, got {}",
                self.hud.font_size
            ));
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<DemoConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DemoConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config_from_path`], but a missing file means "use defaults".
pub fn load_config_or_default(path: &Path) -> Result<DemoConfig, ConfigError> {
    if !path.exists() {
        log::warn!(
            "Config '{}' not found, using built-in defaults",
            path.display()
        );
        return Ok(DemoConfig::default());
    }
    load_config_from_path(path)
}
