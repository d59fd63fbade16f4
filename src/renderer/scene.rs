//! Frame description built from the game state
//!
//! Everything here is plain data in canvas pixels. The Canvas 2D backend
//! only walks these lists.

use glam::{IVec2, Vec2};

use crate::sim::{Cell, GameState, PlayerMode};

pub const FOG_COLOR: &str = "rgba(5, 8, 22, 0.88)";
pub const FOG_TINT_COLOR: &str = "rgba(99, 245, 198, 0.08)";
pub const SECURED_COLOR: &str = "rgba(99, 245, 198, 0.04)";
pub const TRAIL_COLOR: &str = "rgba(99, 245, 198, 0.65)";
pub const PLAYER_DRAWING_COLOR: &str = "#63f5c6";
pub const PLAYER_IDLE_COLOR: &str = "#7c4dff";
pub const PLAYER_OUTLINE_COLOR: &str = "rgba(255, 255, 255, 0.4)";
pub const PLAYER_OUTLINE_WIDTH: f64 = 1.5;
pub const ADVERSARY_COLOR: &str = "rgba(255, 101, 132, 0.92)";
pub const ADVERSARY_OUTLINE_COLOR: &str = "rgba(255, 255, 255, 0.45)";
pub const ADVERSARY_OUTLINE_WIDTH: f64 = 2.2;

/// Player square inset from its cell edges (px)
pub const PLAYER_INSET: f32 = 4.0;

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink evenly on all sides
    pub fn inset(self, by: f32) -> Self {
        Self::new(
            self.x + by,
            self.y + by,
            (self.w - 2.0 * by).max(0.0),
            (self.h - 2.0 * by).max(0.0),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerGlyph {
    pub rect: Rect,
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdversaryGlyph {
    pub center: Vec2,
    pub radius: f32,
}

/// One frame worth of drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// Wall and claimed cells: cut out of the fog and tinted
    pub secured: Vec<Rect>,
    /// Active trail cells
    pub trail: Vec<Rect>,
    pub player: PlayerGlyph,
    pub adversary: AdversaryGlyph,
}

impl Scene {
    pub fn from_state(state: &GameState) -> Self {
        let cs = state.cell_size();
        let cell_rect =
            |cell: IVec2| Rect::new(cell.x as f32 * cs, cell.y as f32 * cs, cs, cs);

        let mut secured = Vec::new();
        let mut trail = Vec::with_capacity(state.player.trail.len());
        for (cell, kind) in state.grid.iter() {
            match kind {
                Cell::Wall | Cell::Claimed => secured.push(cell_rect(cell)),
                Cell::Trail => trail.push(cell_rect(cell)),
                Cell::Empty => {}
            }
        }

        let fill = match state.player.mode {
            PlayerMode::Drawing => PLAYER_DRAWING_COLOR,
            PlayerMode::Idle => PLAYER_IDLE_COLOR,
        };

        Self {
            width: state.settings.canvas_width as f32,
            height: state.settings.canvas_height as f32,
            secured,
            trail,
            player: PlayerGlyph {
                rect: cell_rect(state.player.pos).inset(PLAYER_INSET),
                fill,
            },
            adversary: AdversaryGlyph {
                center: state.adversary.pos,
                radius: state.adversary.radius,
            },
        }
    }
}
