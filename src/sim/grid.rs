//! Cell grid for the playfield
//!
//! The outer ring is permanent wall. Everything the player and probe do is
//! expressed as transitions between the four cell states.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Border ring, never changes
    Wall,
    /// Unclaimed space the probe roams
    #[default]
    Empty,
    /// Part of the player's unfinished trail
    Trail,
    /// Secured territory
    Claimed,
}

impl Cell {
    /// Walls and claimed cells: safe for the player, solid for the probe
    #[inline]
    pub fn is_secured(self) -> bool {
        matches!(self, Cell::Wall | Cell::Claimed)
    }
}

/// Row-major `cols x rows` grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Fresh board: wall ring, empty interior
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut cells = vec![Cell::Empty; cols * rows];
        for y in 0..rows {
            for x in 0..cols {
                if x == 0 || y == 0 || x == cols - 1 || y == rows - 1 {
                    cells[y * cols + x] = Cell::Wall;
                }
            }
        }
        Self { cols, rows, cells }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of non-wall cells, the coverage denominator
    #[inline]
    pub fn interior_cells(&self) -> usize {
        self.cols.saturating_sub(2) * self.rows.saturating_sub(2)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        self.in_bounds(cell.x, cell.y)
    }

    #[inline]
    pub fn is_border(&self, cell: IVec2) -> bool {
        cell.x == 0
            || cell.y == 0
            || cell.x as usize == self.cols - 1
            || cell.y as usize == self.rows - 1
    }

    /// Flat index of an in-bounds cell
    #[inline]
    pub fn index(&self, cell: IVec2) -> usize {
        cell.y as usize * self.cols + cell.x as usize
    }

    /// Cell coordinates of a flat index
    #[inline]
    pub fn coords(&self, index: usize) -> IVec2 {
        IVec2::new((index % self.cols) as i32, (index / self.cols) as i32)
    }

    /// Cell state, `None` when out of bounds
    #[inline]
    pub fn get(&self, cell: IVec2) -> Option<Cell> {
        self.contains(cell).then(|| self.cells[self.index(cell)])
    }

    /// Out-of-bounds and the wall ring are treated as solid
    #[inline]
    pub fn is_solid(&self, cell: IVec2) -> bool {
        self.get(cell).is_none_or(Cell::is_secured)
    }

    /// Write a cell. Out-of-bounds writes and writes to the wall ring are ignored.
    pub fn set(&mut self, cell: IVec2, value: Cell) {
        if !self.contains(cell) || self.is_border(cell) {
            return;
        }
        let i = self.index(cell);
        self.cells[i] = value;
    }

    /// Write by flat index (same rules as `set`)
    pub fn set_index(&mut self, index: usize, value: Cell) {
        if index < self.cells.len() {
            self.set(self.coords(index), value);
        }
    }

    #[inline]
    pub fn cell_at_index(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Claimed cells inside the wall ring
    pub fn count_claimed_interior(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Claimed).count()
    }

    /// Iterate `(cell, state)` over the whole board in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.coords(i), *c))
    }

    /// Raw cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_ring_and_interior() {
        let g = Grid::new(8, 5);
        assert_eq!(g.interior_cells(), 18);
        for (cell, state) in g.iter() {
            if g.is_border(cell) {
                assert_eq!(state, Cell::Wall, "{cell:?}");
            } else {
                assert_eq!(state, Cell::Empty, "{cell:?}");
            }
        }
        assert_eq!(g.count_claimed_interior(), 0);
    }

    #[test]
    fn test_in_bounds() {
        let g = Grid::new(8, 5);
        assert!(g.in_bounds(0, 0));
        assert!(g.in_bounds(7, 4));
        assert!(!g.in_bounds(8, 4));
        assert!(!g.in_bounds(-1, 2));
        assert!(!g.in_bounds(3, 5));
        assert_eq!(g.get(IVec2::new(-1, 0)), None);
    }

    #[test]
    fn test_wall_ring_is_permanent() {
        let mut g = Grid::new(8, 5);
        g.set(IVec2::new(0, 2), Cell::Empty);
        g.set(IVec2::new(3, 4), Cell::Trail);
        g.set(IVec2::new(99, 99), Cell::Claimed);
        assert_eq!(g.get(IVec2::new(0, 2)), Some(Cell::Wall));
        assert_eq!(g.get(IVec2::new(3, 4)), Some(Cell::Wall));
    }

    #[test]
    fn test_index_roundtrip_and_claim_count() {
        let mut g = Grid::new(8, 5);
        let c = IVec2::new(5, 3);
        assert_eq!(g.coords(g.index(c)), c);
        g.set(c, Cell::Claimed);
        g.set_index(g.index(IVec2::new(2, 2)), Cell::Claimed);
        assert_eq!(g.count_claimed_interior(), 2);
    }

    #[test]
    fn test_solidity() {
        let mut g = Grid::new(8, 5);
        g.set(IVec2::new(2, 2), Cell::Claimed);
        g.set(IVec2::new(3, 2), Cell::Trail);
        assert!(g.is_solid(IVec2::new(0, 0)));
        assert!(g.is_solid(IVec2::new(-3, 1)));
        assert!(g.is_solid(IVec2::new(2, 2)));
        assert!(!g.is_solid(IVec2::new(3, 2)));
        assert!(!g.is_solid(IVec2::new(4, 2)));
    }
}
