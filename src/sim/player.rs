//! Player movement and trail drawing
//!
//! The player moves one cell per step. Leaving secured territory starts a
//! trail; returning to it closes the trail.

use std::collections::BTreeSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};

/// Four-way grid direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid space (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Whether the player is extending a trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerMode {
    #[default]
    Idle,
    Drawing,
}

/// Current heading plus a single pending slot.
///
/// Input overwrites the pending slot (last write wins); the loop applies it
/// once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub current: Option<Direction>,
    pub pending: Option<Direction>,
}

impl Steering {
    /// Stage a direction change
    pub fn queue(&mut self, dir: Direction) {
        self.pending = Some(dir);
    }

    /// Stop immediately and drop anything staged
    pub fn halt(&mut self) {
        self.current = None;
        self.pending = None;
    }

    /// Apply the pending direction. A reversal is dropped when `guard_reversal`
    /// is set (drawing with a non-empty trail).
    pub fn apply_pending(&mut self, guard_reversal: bool) {
        let Some(next) = self.pending.take() else {
            return;
        };
        let reversal = self.current.is_some_and(|cur| cur.opposite() == next);
        if reversal && guard_reversal {
            return;
        }
        self.current = Some(next);
    }
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No direction set
    Idle,
    /// Target out of bounds; heading was reset
    Blocked,
    /// Moved without closing a trail
    Moved,
    /// Moved onto secured ground while drawing: the trail must be resolved
    Closed,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    pub mode: PlayerMode,
    /// Active trail as flat grid indices
    pub trail: BTreeSet<usize>,
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            mode: PlayerMode::Idle,
            trail: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn is_drawing(&self) -> bool {
        self.mode == PlayerMode::Drawing
    }

    /// Drawing with at least one trail cell laid down
    #[inline]
    pub fn has_live_trail(&self) -> bool {
        self.is_drawing() && !self.trail.is_empty()
    }

    /// Whether a cell is part of the active trail
    pub fn trail_contains(&self, grid: &Grid, cell: IVec2) -> bool {
        grid.contains(cell) && self.trail.contains(&grid.index(cell))
    }

    fn mark_trail(&mut self, grid: &mut Grid, cell: IVec2) {
        if !grid.contains(cell) {
            return;
        }
        self.trail.insert(grid.index(cell));
        grid.set(cell, Cell::Trail);
    }

    fn start_trail(&mut self, grid: &mut Grid) {
        self.mode = PlayerMode::Drawing;
        self.trail.clear();
        self.mark_trail(grid, self.pos);
    }

    /// Rewrite every trail cell to `fill` and forget the trail.
    /// Touches exactly the recorded cells, so repeating it is harmless.
    pub fn clear_trail(&mut self, grid: &mut Grid, fill: Cell) {
        for &i in &self.trail {
            grid.set_index(i, fill);
        }
        self.trail.clear();
    }

    /// Back to `start`, idle, with any trail reverted to empty
    pub fn reset(&mut self, grid: &mut Grid, start: IVec2) {
        self.pos = start;
        self.mode = PlayerMode::Idle;
        self.clear_trail(grid, Cell::Empty);
    }

    /// Attempt one grid step in `steering.current`.
    ///
    /// On `Closed` the caller resolves the claim and then calls `finish_trail`.
    pub fn step(&mut self, grid: &mut Grid, steering: &mut Steering) -> StepOutcome {
        let Some(dir) = steering.current else {
            return StepOutcome::Idle;
        };

        let next = self.pos + dir.delta();
        let Some(target) = grid.get(next) else {
            steering.current = None;
            return StepOutcome::Blocked;
        };

        self.pos = next;

        match self.mode {
            PlayerMode::Drawing if target.is_secured() => StepOutcome::Closed,
            PlayerMode::Drawing => {
                self.mark_trail(grid, next);
                StepOutcome::Moved
            }
            PlayerMode::Idle => {
                if target == Cell::Empty {
                    self.start_trail(grid);
                }
                StepOutcome::Moved
            }
        }
    }

    /// Leave drawing mode after a claim. The trail cells are expected to have
    /// been claimed already; any left over are cleared to `Claimed`.
    pub fn finish_trail(&mut self, grid: &mut Grid, steering: &mut Steering) {
        self.clear_trail(grid, Cell::Claimed);
        self.mode = PlayerMode::Idle;
        steering.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Grid, Player, Steering) {
        // 8x5 board, player on bottom wall
        (Grid::new(8, 5), Player::new(IVec2::new(4, 4)), Steering::default())
    }

    #[test]
    fn test_no_direction_no_move() {
        let (mut g, mut p, mut s) = setup();
        assert_eq!(p.step(&mut g, &mut s), StepOutcome::Idle);
        assert_eq!(p.pos, IVec2::new(4, 4));
    }

    #[test]
    fn test_out_of_bounds_resets_heading() {
        let (mut g, mut p, mut s) = setup();
        s.current = Some(Direction::Down);
        let before = g.clone();
        assert_eq!(p.step(&mut g, &mut s), StepOutcome::Blocked);
        assert_eq!(s.current, None);
        assert_eq!(p.pos, IVec2::new(4, 4));
        assert_eq!(g, before);
    }

    #[test]
    fn test_walking_wall_stays_idle() {
        let (mut g, mut p, mut s) = setup();
        s.current = Some(Direction::Left);
        assert_eq!(p.step(&mut g, &mut s), StepOutcome::Moved);
        assert_eq!(p.pos, IVec2::new(3, 4));
        assert_eq!(p.mode, PlayerMode::Idle);
        assert!(p.trail.is_empty());
    }

    #[test]
    fn test_entering_empty_starts_trail() {
        let (mut g, mut p, mut s) = setup();
        s.current = Some(Direction::Up);
        assert_eq!(p.step(&mut g, &mut s), StepOutcome::Moved);
        assert_eq!(p.mode, PlayerMode::Drawing);
        assert_eq!(g.get(IVec2::new(4, 3)), Some(Cell::Trail));
        assert_eq!(p.trail.len(), 1);

        assert_eq!(p.step(&mut g, &mut s), StepOutcome::Moved);
        assert_eq!(g.get(IVec2::new(4, 2)), Some(Cell::Trail));
        assert_eq!(p.trail.len(), 2);
    }

    #[test]
    fn test_reaching_secured_closes() {
        let (mut g, mut p, mut s) = setup();
        s.current = Some(Direction::Up);
        for _ in 0..3 {
            p.step(&mut g, &mut s);
        }
        // (4,1) is the last interior row; next is the top wall
        assert_eq!(p.pos, IVec2::new(4, 1));
        assert_eq!(p.step(&mut g, &mut s), StepOutcome::Closed);
        assert_eq!(p.pos, IVec2::new(4, 0));

        p.finish_trail(&mut g, &mut s);
        assert_eq!(p.mode, PlayerMode::Idle);
        assert!(p.trail.is_empty());
        assert_eq!(s.current, None);
        assert_eq!(g.get(IVec2::new(4, 2)), Some(Cell::Claimed));
    }

    #[test]
    fn test_reset_reverts_trail_to_empty() {
        let (mut g, mut p, mut s) = setup();
        s.current = Some(Direction::Up);
        p.step(&mut g, &mut s);
        p.step(&mut g, &mut s);
        p.reset(&mut g, IVec2::new(4, 4));
        assert_eq!(g, Grid::new(8, 5));
        assert_eq!(p.mode, PlayerMode::Idle);
        // idempotent
        p.clear_trail(&mut g, Cell::Empty);
        assert_eq!(g, Grid::new(8, 5));
    }

    #[test]
    fn test_reversal_guard() {
        let mut s = Steering {
            current: Some(Direction::Up),
            pending: None,
        };
        s.queue(Direction::Down);
        s.apply_pending(true);
        assert_eq!(s.current, Some(Direction::Up));
        assert_eq!(s.pending, None);

        s.queue(Direction::Down);
        s.apply_pending(false);
        assert_eq!(s.current, Some(Direction::Down));
    }

    #[test]
    fn test_pending_last_write_wins() {
        let mut s = Steering::default();
        s.queue(Direction::Left);
        s.queue(Direction::Right);
        s.apply_pending(true);
        assert_eq!(s.current, Some(Direction::Right));
    }

    #[test]
    fn test_halt_clears_both() {
        let mut s = Steering {
            current: Some(Direction::Left),
            pending: Some(Direction::Up),
        };
        s.halt();
        assert_eq!(s, Steering::default());
    }
}
