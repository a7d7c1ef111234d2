//! Maze generator - randomized depth-first backtracking
//!
//! Produces a perfect maze (a spanning tree of the grid graph) starting from a
//! uniformly random cell. The traversal keeps an explicit stack of frames rather
//! than recursing, so grid size is bounded by memory, not by the call stack.
//!
//! The draw order matches the recursive formulation exactly:
//!
//! 1. two samples pick the start row, then the start column
//! 2. every newly visited cell consumes three samples to shuffle its
//!    up/right/down/left candidates
//!
//! so a replayed random stream reproduces the same maze bit for bit.

use std::error::Error;
use std::fmt;

use crate::grid::Grid;
use crate::rng::{shuffle, RandomSource, SimpleRng};
use crate::types::{CellPos, Direction};

/// Generation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// Rows or columns was zero.
    EmptyDimension { rows: usize, columns: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::EmptyDimension { rows, columns } => write!(
                f,
                "maze dimensions must be at least 1x1 (got {}x{})",
                rows, columns
            ),
        }
    }
}

impl Error for MazeError {}

/// A cell whose candidate list is partially processed.
struct Frame {
    cell: CellPos,
    candidates: [Direction; 4],
    next: usize,
}

/// Generate a `rows × columns` maze.
///
/// # Examples
///
/// ```
/// use tui_maze_core::{generate, SimpleRng};
///
/// let grid = generate(6, 6, &mut SimpleRng::new(42)).unwrap();
/// assert!(grid.all_visited());
/// assert_eq!(grid.open_passage_count(), 6 * 6 - 1);
/// ```
pub fn generate<R: RandomSource + ?Sized>(
    rows: usize,
    columns: usize,
    random: &mut R,
) -> Result<Grid, MazeError> {
    if rows == 0 || columns == 0 {
        return Err(MazeError::EmptyDimension { rows, columns });
    }

    let mut grid = Grid::new(rows, columns);
    let start = CellPos::new(random.index_below(rows), random.index_below(columns));
    carve_from(&mut grid, start, random);
    debug_assert!(grid.all_visited(), "traversal left a cell unvisited");

    log::debug!(
        "[Maze] generated {}x{} from ({}, {}), {} passages",
        rows,
        columns,
        start.row,
        start.column,
        grid.open_passage_count()
    );
    Ok(grid)
}

/// Generate a maze from a seed using [`SimpleRng`].
pub fn generate_seeded(rows: usize, columns: usize, seed: u32) -> Result<Grid, MazeError> {
    generate(rows, columns, &mut SimpleRng::new(seed))
}

/// Depth-first carve starting at `start`.
///
/// Cells that are already visited are never re-entered, so calling this on a
/// partially carved grid only extends it into unvisited territory.
pub fn carve_from<R: RandomSource + ?Sized>(grid: &mut Grid, start: CellPos, random: &mut R) {
    let mut stack: Vec<Frame> = Vec::new();
    if let Some(frame) = enter(grid, start, random) {
        stack.push(frame);
    }

    while let Some(top) = stack.last_mut() {
        if top.next >= top.candidates.len() {
            stack.pop();
            continue;
        }

        let cell = top.cell;
        let direction = top.candidates[top.next];
        top.next += 1;

        let Some(neighbor) = cell.step(direction, grid.rows(), grid.columns()) else {
            continue;
        };
        if grid.is_visited(neighbor) {
            continue;
        }

        grid.open_passage(cell, direction);
        if let Some(frame) = enter(grid, neighbor, random) {
            stack.push(frame);
        }
    }
}

/// Mark `cell` visited and shuffle its candidates. `None` if it was already visited.
fn enter<R: RandomSource + ?Sized>(grid: &mut Grid, cell: CellPos, random: &mut R) -> Option<Frame> {
    if !grid.mark_visited(cell) {
        return None;
    }
    let mut candidates = Direction::ALL;
    shuffle(&mut candidates, random);
    Some(Frame {
        cell,
        candidates,
        next: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    #[test]
    fn test_rejects_empty_dimensions() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(
            generate(0, 5, &mut rng),
            Err(MazeError::EmptyDimension { rows: 0, columns: 5 })
        );
        assert!(generate(5, 0, &mut rng).is_err());
    }

    #[test]
    fn test_error_message_names_dimensions() {
        let err = MazeError::EmptyDimension { rows: 0, columns: 3 };
        assert_eq!(err.to_string(), "maze dimensions must be at least 1x1 (got 0x3)");
    }

    #[test]
    fn test_single_cell_maze_has_no_passages() {
        let mut rng = SequenceRng::constant(0.5);
        let grid = generate(1, 1, &mut rng).unwrap();
        assert!(grid.all_visited());
        assert_eq!(grid.open_passage_count(), 0);
        // Two start draws plus one shuffle of the only cell.
        assert_eq!(rng.draws(), 5);
    }

    #[test]
    fn test_consumes_three_samples_per_cell_plus_start() {
        let mut rng = SequenceRng::constant(0.3);
        let grid = generate(4, 5, &mut rng).unwrap();
        assert_eq!(rng.draws(), 2 + 3 * grid.cell_count());
    }

    #[test]
    fn test_carve_from_extends_partial_grid() {
        let mut grid = Grid::new(2, 2);
        grid.mark_visited(CellPos::new(0, 0));
        let mut rng = SequenceRng::constant(0.0);
        carve_from(&mut grid, CellPos::new(1, 1), &mut rng);
        assert!(grid.all_visited());
        // (0,0) was pre-marked, so no passage leads into it.
        assert!(!grid.is_open(CellPos::new(0, 0), Direction::Right));
        assert!(!grid.is_open(CellPos::new(0, 0), Direction::Down));
        assert_eq!(grid.open_passage_count(), 2);
    }

    #[test]
    fn test_carve_from_visited_start_is_a_no_op() {
        let mut grid = Grid::new(2, 2);
        grid.mark_visited(CellPos::new(0, 0));
        let mut rng = SequenceRng::constant(0.0);
        carve_from(&mut grid, CellPos::new(0, 0), &mut rng);
        assert_eq!(grid.open_passage_count(), 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_seeded(12, 9, 2024).unwrap();
        let b = generate_seeded(12, 9, 2024).unwrap();
        assert_eq!(a, b);
    }
}
