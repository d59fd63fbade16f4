//! Territory claiming
//!
//! When a trail closes, everything the probe can no longer reach becomes
//! claimed. Reachability is a breadth-first fill from the probe's cell through
//! empty cells only, so trail, wall and claimed cells all act as barriers.
//! This handles closed loops and wall-to-wall cuts alike.

use std::collections::{BTreeSet, VecDeque};

use glam::IVec2;

use super::grid::{Cell, Grid};

const NEIGHBORS: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

/// Cells reachable from `start` through empty cells.
///
/// `start` is clamped into the grid. A secured start cell seeds nothing.
pub fn reachable_from(grid: &Grid, start: IVec2) -> Vec<bool> {
    let mut visited = vec![false; grid.cols() * grid.rows()];
    let max = IVec2::new(grid.cols() as i32 - 1, grid.rows() as i32 - 1);
    let start = start.clamp(IVec2::ZERO, max);

    let mut queue = VecDeque::new();
    if grid.get(start).is_some_and(|c| !c.is_secured()) {
        visited[grid.index(start)] = true;
        queue.push_back(start);
    }

    while let Some(cur) = queue.pop_front() {
        for dir in NEIGHBORS {
            let next = cur + dir;
            if grid.get(next) != Some(Cell::Empty) {
                continue;
            }
            let i = grid.index(next);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            queue.push_back(next);
        }
    }

    visited
}

/// Close out a trail.
///
/// Empty cells unreachable from `adversary_cell` are claimed, then every trail
/// cell is claimed. With an empty trail nothing changes. Returns the number of
/// enclosed empty cells claimed (trail cells are not counted).
pub fn resolve_claim(grid: &mut Grid, trail: &BTreeSet<usize>, adversary_cell: IVec2) -> usize {
    if trail.is_empty() {
        return 0;
    }

    let reachable = reachable_from(grid, adversary_cell);

    let mut newly_claimed = 0;
    for y in 1..grid.rows().saturating_sub(1) {
        for x in 1..grid.cols().saturating_sub(1) {
            let cell = IVec2::new(x as i32, y as i32);
            let i = grid.index(cell);
            if grid.get(cell) == Some(Cell::Empty) && !reachable[i] {
                grid.set(cell, Cell::Claimed);
                newly_claimed += 1;
            }
        }
    }

    for &i in trail {
        grid.set_index(i, Cell::Claimed);
    }

    newly_claimed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail_of(grid: &mut Grid, cells: &[(i32, i32)]) -> BTreeSet<usize> {
        let mut trail = BTreeSet::new();
        for &(x, y) in cells {
            let c = IVec2::new(x, y);
            grid.set(c, Cell::Trail);
            trail.insert(grid.index(c));
        }
        trail
    }

    #[test]
    fn test_empty_trail_is_noop() {
        let mut grid = Grid::new(10, 8);
        grid.set(IVec2::new(2, 2), Cell::Claimed);
        let before = grid.clone();
        let n = resolve_claim(&mut grid, &BTreeSet::new(), IVec2::new(5, 5));
        assert_eq!(n, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_wall_to_wall_cut_claims_far_side() {
        // Vertical cut at x = 3 from top wall to bottom wall on a 10x6 board.
        let mut grid = Grid::new(10, 6);
        let trail = trail_of(&mut grid, &[(3, 1), (3, 2), (3, 3), (3, 4)]);

        // Probe on the right: left pocket (x = 1..=2, y = 1..=4) is claimed.
        let n = resolve_claim(&mut grid, &trail, IVec2::new(7, 2));
        assert_eq!(n, 8);
        for y in 1..=4 {
            for x in 1..=3 {
                assert_eq!(grid.get(IVec2::new(x, y)), Some(Cell::Claimed));
            }
            for x in 4..=8 {
                assert_eq!(grid.get(IVec2::new(x, y)), Some(Cell::Empty));
            }
        }
        assert_eq!(grid.count_claimed_interior(), 12);
    }

    #[test]
    fn test_closed_loop_claims_only_inside() {
        let mut grid = Grid::new(12, 10);
        // Ring around the 2x2 block (4..=5, 4..=5)
        let mut ring = Vec::new();
        for x in 3..=6 {
            ring.push((x, 3));
            ring.push((x, 6));
        }
        for y in 4..=5 {
            ring.push((3, y));
            ring.push((6, y));
        }
        let trail = trail_of(&mut grid, &ring);

        let n = resolve_claim(&mut grid, &trail, IVec2::new(9, 8));
        assert_eq!(n, 4);
        assert_eq!(grid.count_claimed_interior(), 4 + ring.len());
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(Cell::Empty));
        assert_eq!(grid.get(IVec2::new(10, 8)), Some(Cell::Empty));
    }

    #[test]
    fn test_probe_inside_loop_claims_outside() {
        let mut grid = Grid::new(8, 8);
        let mut ring = Vec::new();
        for x in 2..=5 {
            ring.push((x, 2));
            ring.push((x, 5));
        }
        for y in 3..=4 {
            ring.push((2, y));
            ring.push((5, y));
        }
        let trail = trail_of(&mut grid, &ring);

        let n = resolve_claim(&mut grid, &trail, IVec2::new(3, 3));
        // 36 interior - 12 ring - 4 inside
        assert_eq!(n, 20);
        assert_eq!(grid.get(IVec2::new(4, 4)), Some(Cell::Empty));
    }

    #[test]
    fn test_existing_claimed_cells_complete_the_barrier() {
        // Cut at x = 4: rows 1..=3 already claimed, trail closes rows 4..=6.
        let mut grid = Grid::new(10, 8);
        for y in 1..=3 {
            grid.set(IVec2::new(4, y), Cell::Claimed);
        }
        let trail = trail_of(&mut grid, &[(4, 4), (4, 5), (4, 6)]);

        let n = resolve_claim(&mut grid, &trail, IVec2::new(7, 3));
        assert_eq!(n, 18);
        for y in 1..=6 {
            for x in 1..=4 {
                assert_eq!(grid.get(IVec2::new(x, y)), Some(Cell::Claimed));
            }
            for x in 5..=8 {
                assert_eq!(grid.get(IVec2::new(x, y)), Some(Cell::Empty));
            }
        }
        assert_eq!(grid.count_claimed_interior(), 18 + 3 + 3);
    }

    #[test]
    fn test_probe_start_is_clamped() {
        let mut grid = Grid::new(10, 6);
        let trail = trail_of(&mut grid, &[(3, 1), (3, 2), (3, 3), (3, 4)]);
        // Far outside the right edge clamps onto the wall: nothing is reachable.
        let visited = reachable_from(&grid, IVec2::new(500, 2));
        assert!(visited.iter().all(|v| !v));
        let n = resolve_claim(&mut grid, &trail, IVec2::new(500, 2));
        assert_eq!(n, 8 + 20);
    }
}
