//! Game settings and tuning
//!
//! Every physical and layout constant the simulation uses, gathered in one
//! serializable record. Persisted in LocalStorage on the web so the feel can
//! be tweaked without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a settings record was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("canvas must be positive, got {width}x{height}")]
    Canvas { width: f32, height: f32 },

    #[error("body radius {radius} does not fit a surface of height {height}")]
    BodyRadius { radius: f32, height: f32 },

    #[error("obstacle width must be positive, got {0}")]
    ObstacleWidth(f32),

    #[error("spawn period must be at least one frame")]
    SpawnPeriod,

    #[error("top height range is empty: min {min} > max {max}")]
    TopHeightRange { min: f32, max: f32 },
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Body ===
    pub body_x: f32,
    pub body_radius: f32,
    pub gravity: f32,
    pub impulse: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap_size: f32,
    pub spawn_period: u64,
    pub scroll_speed: f32,
    pub min_top_height: f32,
    pub ground_margin: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            body_x: BODY_X,
            body_radius: BODY_RADIUS,
            gravity: GRAVITY,
            impulse: IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            spawn_period: SPAWN_PERIOD,
            scroll_speed: SCROLL_SPEED,
            min_top_height: MIN_TOP_HEIGHT,
            ground_margin: GROUND_MARGIN,
        }
    }
}

impl Settings {
    /// Ground line the body is clamped against
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.canvas_height
    }

    /// Largest top segment height that still leaves `ground_margin` under the gap
    #[inline]
    pub fn max_top_height(&self) -> f32 {
        self.canvas_height - self.gap_size - self.ground_margin
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(SettingsError::Canvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.body_radius <= 0.0 || self.body_radius * 2.0 > self.canvas_height {
            return Err(SettingsError::BodyRadius {
                radius: self.body_radius,
                height: self.canvas_height,
            });
        }
        if self.obstacle_width <= 0.0 {
            return Err(SettingsError::ObstacleWidth(self.obstacle_width));
        }
        if self.spawn_period == 0 {
            return Err(SettingsError::SpawnPeriod);
        }
        if self.min_top_height > self.max_top_height() {
            return Err(SettingsError::TopHeightRange {
                min: self.min_top_height,
                max: self.max_top_height(),
            });
        }
        Ok(())
    }

    /// Parse a JSON blob, keeping defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => Some(settings),
                Err(e) => {
                    log::warn!("Stored settings rejected: {}", e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Stored settings unreadable: {}", e);
                None
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(SETTINGS_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
