//! Game settings
//!
//! Read once at startup from an optional JSON block in the host page:
//! `<script id="game-config" type="application/json">{ ... }</script>`.
//! Any field left out keeps its default.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::NUM_COLS;

/// Smallest accepted placement budget. Filling six of seven rock columns
/// takes about eleven draws on average; at this budget a shortfall is
/// vanishingly rare.
pub const MIN_SPAWN_RETRIES: u32 = 100;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Classic,
    Frantic,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Classic => "Classic",
            Difficulty::Frantic => "Frantic",
        }
    }

    /// Upper bound of the bug speed draw (pixels per second)
    pub fn max_enemy_speed(&self) -> f32 {
        match self {
            Difficulty::Classic => 400.0,
            Difficulty::Frantic => 500.0,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_rocks {0} exceeds the {} columns of the rock lane", NUM_COLS)]
    TooManyRocks(usize),
    #[error("enemy speed range {min}..{max} is empty")]
    EmptySpeedRange { min: f32, max: f32 },
    #[error("max_level {max_level} must be above start_level {start_level}")]
    LevelRange { start_level: u32, max_level: u32 },
    #[error("max_spawn_retries {0} is below the minimum of {}", MIN_SPAWN_RETRIES)]
    TooFewRetries(u32),
    #[error("master_volume {0} is outside 0.0..=1.0")]
    Volume(f32),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Speed preset
    pub difficulty: Difficulty,

    // === Levels ===
    /// Level a fresh game starts on
    pub start_level: u32,
    /// Reaching this level wins
    pub max_level: u32,

    // === Spawning ===
    /// Bug cap (count grows as level + 3)
    pub max_enemies: usize,
    /// Rock cap (count grows as level / 2)
    pub max_rocks: usize,
    /// Slowest bug speed in pixels per second
    pub enemy_speed_min: f32,
    /// Fastest bug speed; falls back to the difficulty preset
    pub enemy_speed_max: Option<f32>,
    /// Draw budget for rock and gem placement
    pub max_spawn_retries: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Classic,

            start_level: 0,
            max_level: 15,

            max_enemies: 10,
            max_rocks: 6,
            enemy_speed_min: 50.0,
            enemy_speed_max: None,
            max_spawn_retries: 1000,

            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Bug speed draw range
    pub fn enemy_speed_range(&self) -> Range<f32> {
        let max = self
            .enemy_speed_max
            .unwrap_or_else(|| self.difficulty.max_enemy_speed());
        self.enemy_speed_min..max
    }

    /// Effective volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Reject configurations that would make level generation impossible
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rocks > NUM_COLS as usize {
            return Err(ConfigError::TooManyRocks(self.max_rocks));
        }
        let speed = self.enemy_speed_range();
        if !(speed.start.is_finite() && speed.end.is_finite() && speed.start < speed.end) {
            return Err(ConfigError::EmptySpeedRange {
                min: speed.start,
                max: speed.end,
            });
        }
        if self.max_level <= self.start_level {
            return Err(ConfigError::LevelRange {
                start_level: self.start_level,
                max_level: self.max_level,
            });
        }
        if self.max_spawn_retries < MIN_SPAWN_RETRIES {
            return Err(ConfigError::TooFewRetries(self.max_spawn_retries));
        }
        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(ConfigError::Volume(self.master_volume));
        }
        Ok(())
    }

    /// Parse and validate a JSON config block
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// DOM id of the config block
    const CONFIG_ELEMENT_ID: &'static str = "game-config";

    /// Load settings from the host page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings ({})", settings.difficulty.as_str());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring #{}: {}", Self::CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No #{} outside the browser", Self::CONFIG_ELEMENT_ID);
        Self::default()
    }
}
