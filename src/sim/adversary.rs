//! The probe: a ball bouncing around unclaimed space
//!
//! Position is continuous (pixels). Each axis is tested separately against
//! the cell it would enter so corners reflect on both axes.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::{cell_at, cell_center};

/// The adversary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Adversary {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Place at the centre of the board's middle cell with a random diagonal
    /// velocity of `speed` per axis
    pub fn respawn<R: Rng>(&mut self, grid: &Grid, cell_size: f32, speed: f32, rng: &mut R) {
        let spawn = IVec2::new((grid.cols() / 2) as i32, (grid.rows() / 2) as i32);
        self.pos = cell_center(spawn, cell_size);
        let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(sx, sy) * speed;
    }

    /// Cell the probe currently occupies (may be out of bounds)
    #[inline]
    pub fn cell(&self, cell_size: f32) -> IVec2 {
        cell_at(self.pos, cell_size)
    }

    /// Advance by `dt` seconds. Returns the cell occupied afterwards.
    ///
    /// `boost` is the extra speed fraction from coverage (already capped).
    /// Solid cells and the board edge flip the matching velocity component.
    /// The final position is clamped half a cell inside the board.
    pub fn advance(&mut self, grid: &Grid, cell_size: f32, dt: f32, boost: f32) -> IVec2 {
        let scale = dt * (1.0 + boost);
        let current = self.cell(cell_size);

        let mut next = self.pos + self.vel * scale;
        let next_cell = cell_at(next, cell_size);

        if grid.is_solid(IVec2::new(next_cell.x, current.y)) {
            self.vel.x = -self.vel.x;
            next.x = self.pos.x + self.vel.x * scale;
        }
        if grid.is_solid(IVec2::new(current.x, next_cell.y)) {
            self.vel.y = -self.vel.y;
            next.y = self.pos.y + self.vel.y * scale;
        }

        let half = cell_size / 2.0;
        let max = Vec2::new(
            grid.cols() as f32 * cell_size - half,
            grid.rows() as f32 * cell_size - half,
        );
        self.pos = next.clamp(Vec2::splat(half), max);
        self.cell(cell_size)
    }
}

/// Coverage-driven speed boost, capped
#[inline]
pub fn speed_boost(coverage: f32, cap: f32) -> f32 {
    coverage.min(cap).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Cell;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const CELL: f32 = 20.0;

    #[test]
    fn test_respawn_center_diagonal() {
        let grid = Grid::new(36, 24);
        let mut a = Adversary::new(7.6);
        let mut rng = Pcg32::seed_from_u64(7);
        a.respawn(&grid, CELL, 95.0, &mut rng);
        assert_eq!(a.pos, Vec2::new(18.5 * CELL, 12.5 * CELL));
        assert_eq!(a.vel.x.abs(), 95.0);
        assert_eq!(a.vel.y.abs(), 95.0);
    }

    #[test]
    fn test_free_flight() {
        let grid = Grid::new(36, 24);
        let mut a = Adversary::new(7.6);
        a.pos = Vec2::new(200.0, 200.0);
        a.vel = Vec2::new(100.0, -50.0);
        a.advance(&grid, CELL, 0.1, 0.0);
        assert!((a.pos - Vec2::new(210.0, 195.0)).length() < 1e-4);
        assert_eq!(a.vel, Vec2::new(100.0, -50.0));
    }

    #[test]
    fn test_boost_scales_distance() {
        let grid = Grid::new(36, 24);
        let mut a = Adversary::new(7.6);
        a.pos = Vec2::new(200.0, 200.0);
        a.vel = Vec2::new(100.0, 0.0);
        a.advance(&grid, CELL, 0.1, speed_boost(0.9, 0.6));
        assert!((a.pos.x - 216.0).abs() < 1e-3);
    }

    #[test]
    fn test_bounces_off_claimed_cell() {
        let mut grid = Grid::new(36, 24);
        // Probe in cell (5,5), claimed wall of cells at x = 6
        for y in 1..23 {
            grid.set(IVec2::new(6, y), Cell::Claimed);
        }
        let mut a = Adversary::new(7.6);
        a.pos = Vec2::new(5.9 * CELL, 5.5 * CELL);
        a.vel = Vec2::new(100.0, 0.0);
        a.advance(&grid, CELL, 0.05, 0.0);
        assert_eq!(a.vel.x, -100.0);
        assert!(a.pos.x < 6.0 * CELL);
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let grid = Grid::new(10, 10);
        let mut a = Adversary::new(7.6);
        // Interior corner cell (1,1), heading up-left into the walls
        a.pos = Vec2::new(1.1 * CELL, 1.1 * CELL);
        a.vel = Vec2::new(-100.0, -100.0);
        a.advance(&grid, CELL, 0.05, 0.0);
        assert_eq!(a.vel, Vec2::new(100.0, 100.0));
        assert_eq!(a.cell(CELL), IVec2::new(1, 1));
    }

    #[test]
    fn test_huge_velocity_stays_on_canvas() {
        let grid = Grid::new(10, 8);
        let mut a = Adversary::new(7.6);
        a.pos = Vec2::new(100.0, 80.0);
        a.vel = Vec2::new(1.0e7, -3.0e6);
        for _ in 0..10 {
            a.advance(&grid, CELL, 0.1, 0.6);
            assert!(a.pos.x >= 0.0 && a.pos.x <= 10.0 * CELL);
            assert!(a.pos.y >= 0.0 && a.pos.y <= 8.0 * CELL);
        }
    }
}
