//! Sector Control - A grid territory-capture arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, claiming, player, probe, progression)
//! - `renderer`: Scene building and Canvas 2D drawing
//! - `platform`: Browser input mapping (keyboard, virtual joystick)
//! - `settings`: Data-driven tuning and level table
//! - `ui`: HUD text and status banner

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{ConfigError, LevelConfig, Settings};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Default canvas size in pixels
    pub const CANVAS_WIDTH: u32 = 720;
    pub const CANVAS_HEIGHT: u32 = 480;
    /// Edge length of one grid cell in pixels
    pub const CELL_SIZE: u32 = 20;

    /// Seconds per player grid step
    pub const STEP_INTERVAL: f32 = 0.085;
    /// Clamp for frame delta (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lives at the start of a run
    pub const START_LIVES: u8 = 3;

    /// Probe radius as a fraction of the cell size
    pub const ADVERSARY_RADIUS_FACTOR: f32 = 0.38;
    /// Probe speeds up with coverage, capped at +60%
    pub const MAX_SPEED_BOOST: f32 = 0.6;
    /// Contact distance as a fraction of the probe radius
    pub const CONTACT_FACTOR: f32 = 0.85;

    /// Joystick dead zone as a fraction of the base radius
    pub const JOYSTICK_DEAD_ZONE: f32 = 0.28;

    /// Banner durations (seconds)
    pub const BANNER_DURATION: f32 = 2.6;
    pub const BANNER_PULSE_DURATION: f32 = 1.8;
    pub const BANNER_ADVANCE_DURATION: f32 = 2.4;
}

/// Pixel centre of a grid cell
#[inline]
pub fn cell_center(cell: IVec2, cell_size: f32) -> Vec2 {
    (cell.as_vec2() + Vec2::splat(0.5)) * cell_size
}

/// Grid cell containing a pixel position (may be out of bounds)
#[inline]
pub fn cell_at(pos: Vec2, cell_size: f32) -> IVec2 {
    (pos / cell_size).floor().as_ivec2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center_and_back() {
        let c = IVec2::new(3, 7);
        let p = cell_center(c, 20.0);
        assert_eq!(p, Vec2::new(70.0, 150.0));
        assert_eq!(cell_at(p, 20.0), c);
    }

    #[test]
    fn test_cell_at_negative_floors() {
        assert_eq!(cell_at(Vec2::new(-0.5, 5.0), 20.0), IVec2::new(-1, 0));
    }
}
