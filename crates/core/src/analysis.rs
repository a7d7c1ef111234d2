//! Read-only maze analysis: reachability, perfect-maze check and solving.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::types::{CellPos, Direction};

/// Cells reachable from `start` through open passages (BFS mask, `[row][column]`).
pub fn reachable_from(grid: &Grid, start: CellPos) -> Vec<Vec<bool>> {
    let mut seen = vec![vec![false; grid.columns()]; grid.rows()];
    if !grid.contains(start) {
        return seen;
    }

    let mut q = VecDeque::new();
    seen[start.row][start.column] = true;
    q.push_back(start);
    while let Some(cell) = q.pop_front() {
        for next in grid.open_neighbors(cell) {
            if !seen[next.row][next.column] {
                seen[next.row][next.column] = true;
                q.push_back(next);
            }
        }
    }
    seen
}

/// Number of cells reachable from `start`.
pub fn reachable_count(grid: &Grid, start: CellPos) -> usize {
    reachable_from(grid, start)
        .iter()
        .flatten()
        .filter(|&&r| r)
        .count()
}

/// True when the open passages form a spanning tree: connected with exactly
/// `cells - 1` edges (which rules out cycles).
pub fn is_perfect(grid: &Grid) -> bool {
    let cells = grid.cell_count();
    if cells == 0 {
        return false;
    }
    grid.open_passage_count() == cells - 1 && reachable_count(grid, CellPos::new(0, 0)) == cells
}

/// Shortest path from `from` to `to` through open passages, both ends included.
///
/// In a perfect maze this is the unique path.
pub fn shortest_path(grid: &Grid, from: CellPos, to: CellPos) -> Option<Vec<CellPos>> {
    if !grid.contains(from) || !grid.contains(to) {
        return None;
    }

    let mut parent: Vec<Vec<Option<CellPos>>> = vec![vec![None; grid.columns()]; grid.rows()];
    let mut seen = vec![vec![false; grid.columns()]; grid.rows()];
    let mut q = VecDeque::new();
    seen[from.row][from.column] = true;
    q.push_back(from);

    while let Some(cell) = q.pop_front() {
        if cell == to {
            break;
        }
        for next in grid.open_neighbors(cell) {
            if !seen[next.row][next.column] {
                seen[next.row][next.column] = true;
                parent[next.row][next.column] = Some(cell);
                q.push_back(next);
            }
        }
    }

    if !seen[to.row][to.column] {
        return None;
    }

    let mut path = vec![to];
    let mut cur = to;
    while let Some(p) = parent[cur.row][cur.column] {
        path.push(p);
        cur = p;
    }
    path.reverse();
    Some(path)
}

/// Path from the top-left start cell to the bottom-right goal cell.
pub fn solve(grid: &Grid) -> Option<Vec<CellPos>> {
    if grid.cell_count() == 0 {
        return None;
    }
    shortest_path(
        grid,
        CellPos::new(0, 0),
        CellPos::new(grid.rows() - 1, grid.columns() - 1),
    )
}

/// Convert a cell path into the directions walked between consecutive cells.
///
/// Stops at the first pair of cells that are not adjacent.
pub fn path_directions(path: &[CellPos]) -> Vec<Direction> {
    path.windows(2)
        .map_while(|w| w[0].direction_to(w[1]))
        .collect()
}

/// Cells with exactly one open passage.
pub fn dead_ends(grid: &Grid) -> usize {
    grid.cells()
        .filter(|&c| grid.open_neighbors(c).count() == 1)
        .count()
}
