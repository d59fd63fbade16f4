//! Game settings and level table
//!
//! Defaults come from `consts`; a page may override them with JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a settings document is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("canvas {width}x{height} is not a multiple of cell size {cell_size}")]
    CanvasNotAligned {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("grid {cols}x{rows} is too small (need at least 3x3)")]
    GridTooSmall { cols: u32, rows: u32 },
    #[error("no levels configured")]
    NoLevels,
    #[error("level {index} target {target} must be in (0, 1]")]
    BadTarget { index: usize, target: f32 },
    #[error("level {index} adversary speed must be positive")]
    BadSpeed { index: usize },
    #[error("step interval must be positive")]
    BadStepInterval,
    #[error("max frame dt must be positive")]
    BadFrameClamp,
    #[error("a run needs at least one life")]
    NoLives,
    #[error("{name} = {value} is out of range")]
    OutOfRange { name: &'static str, value: f32 },
}

/// One entry of the level table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Background image path revealed under the fog
    pub background: String,
    /// Coverage ratio (0-1) needed to clear the level
    pub target: f32,
    /// Probe speed per axis (pixels/s) before the coverage boost
    pub adversary_speed: f32,
}

impl LevelConfig {
    pub fn new(background: &str, target: f32, adversary_speed: f32) -> Self {
        Self {
            background: background.to_string(),
            target,
            adversary_speed,
        }
    }
}

/// The stock four-sector campaign
pub fn default_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig::new("./bg/1.jpg", 0.55, 95.0),
        LevelConfig::new("./bg/2.jpg", 0.65, 110.0),
        LevelConfig::new("./bg/3.jpg", 0.75, 125.0),
        LevelConfig::new("./bg/4.jpg", 0.82, 140.0),
    ]
}

/// Tunables for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,

    /// Seconds per player grid step
    pub step_interval: f32,
    /// Frame delta clamp (seconds)
    pub max_frame_dt: f32,
    pub start_lives: u8,

    pub adversary_radius_factor: f32,
    /// Cap on the coverage-driven probe speed boost
    pub max_speed_boost: f32,
    /// Contact distance as a fraction of probe radius
    pub contact_factor: f32,

    pub joystick_dead_zone: f32,

    pub levels: Vec<LevelConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            cell_size: CELL_SIZE,
            step_interval: STEP_INTERVAL,
            max_frame_dt: MAX_FRAME_DT,
            start_lives: START_LIVES,
            adversary_radius_factor: ADVERSARY_RADIUS_FACTOR,
            max_speed_boost: MAX_SPEED_BOOST,
            contact_factor: CONTACT_FACTOR,
            joystick_dead_zone: JOYSTICK_DEAD_ZONE,
            levels: default_levels(),
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Grid columns
    pub fn cols(&self) -> usize {
        (self.canvas_width / self.cell_size.max(1)) as usize
    }

    /// Grid rows
    pub fn rows(&self) -> usize {
        (self.canvas_height / self.cell_size.max(1)) as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0
            || self.canvas_width % self.cell_size != 0
            || self.canvas_height % self.cell_size != 0
        {
            return Err(ConfigError::CanvasNotAligned {
                width: self.canvas_width,
                height: self.canvas_height,
                cell_size: self.cell_size,
            });
        }
        let (cols, rows) = (self.cols() as u32, self.rows() as u32);
        if cols < 3 || rows < 3 {
            return Err(ConfigError::GridTooSmall { cols, rows });
        }
        if !(self.step_interval > 0.0) {
            return Err(ConfigError::BadStepInterval);
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(ConfigError::BadFrameClamp);
        }
        if self.start_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        let factors = [
            (
                "adversary_radius_factor",
                self.adversary_radius_factor,
                self.adversary_radius_factor > 0.0,
            ),
            ("contact_factor", self.contact_factor, self.contact_factor > 0.0),
            ("max_speed_boost", self.max_speed_boost, self.max_speed_boost >= 0.0),
            (
                "joystick_dead_zone",
                self.joystick_dead_zone,
                (0.0..1.0).contains(&self.joystick_dead_zone),
            ),
        ];
        if let Some(&(name, value, _)) = factors.iter().find(|(_, _, ok)| !ok) {
            return Err(ConfigError::OutOfRange { name, value });
        }
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (index, level) in self.levels.iter().enumerate() {
            if !(level.target > 0.0 && level.target <= 1.0) {
                return Err(ConfigError::BadTarget {
                    index,
                    target: level.target,
                });
            }
            if !(level.adversary_speed > 0.0) {
                return Err(ConfigError::BadSpeed { index });
            }
        }
        Ok(())
    }

    /// Element id of the optional inline JSON config
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "sector-config";

    /// Load settings from the page's inline config (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings ({} levels)", settings.levels.len());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring page settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
