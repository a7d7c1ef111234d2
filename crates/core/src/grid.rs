//! Grid model: visitation state plus the two passage matrices.
//!
//! All matrices are addressed `[row][column]`:
//!
//! - `visited`: `rows × columns`
//! - `vertical`: `rows × (columns - 1)`, `[r][c]` is the wall between `(r, c)` and `(r, c + 1)`
//! - `horizontal`: `(rows - 1) × columns`, `[r][c]` is the wall between `(r, c)` and `(r + 1, c)`
//!
//! `true` in a passage matrix means the wall is removed.

use std::fmt;

use crate::types::{CellPos, Direction};

#[derive(Debug, Clone, Copy)]
enum Slot {
    Vertical(usize, usize),
    Horizontal(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    visited: Vec<Vec<bool>>,
    vertical: Vec<Vec<bool>>,
    horizontal: Vec<Vec<bool>>,
}

impl Grid {
    /// Create a grid with every cell unvisited and every wall closed.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            visited: vec![vec![false; columns]; rows],
            vertical: vec![vec![false; columns.saturating_sub(1)]; rows],
            horizontal: vec![vec![false; columns]; rows.saturating_sub(1)],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, cell: CellPos) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    pub fn visited(&self) -> &[Vec<bool>] {
        &self.visited
    }

    pub fn vertical_passages(&self) -> &[Vec<bool>] {
        &self.vertical
    }

    pub fn horizontal_passages(&self) -> &[Vec<bool>] {
        &self.horizontal
    }

    pub fn is_visited(&self, cell: CellPos) -> bool {
        self.contains(cell) && self.visited[cell.row][cell.column]
    }

    /// Mark a cell visited.
    ///
    /// Returns `true` only on the transition from unvisited to visited.
    pub fn mark_visited(&mut self, cell: CellPos) -> bool {
        if !self.contains(cell) || self.visited[cell.row][cell.column] {
            return false;
        }
        self.visited[cell.row][cell.column] = true;
        true
    }

    pub fn all_visited(&self) -> bool {
        self.visited.iter().all(|row| row.iter().all(|&v| v))
    }

    /// Matrix slot holding the wall between `cell` and its neighbor in `direction`.
    fn passage_slot(&self, cell: CellPos, direction: Direction) -> Option<Slot> {
        cell.step(direction, self.rows, self.columns)?;
        let slot = match direction {
            Direction::Left => Slot::Vertical(cell.row, cell.column - 1),
            Direction::Right => Slot::Vertical(cell.row, cell.column),
            Direction::Up => Slot::Horizontal(cell.row - 1, cell.column),
            Direction::Down => Slot::Horizontal(cell.row, cell.column),
        };
        Some(slot)
    }

    /// Remove the wall between `cell` and its neighbor in `direction`.
    ///
    /// Returns `false` if the neighbor lies outside the grid.
    pub fn open_passage(&mut self, cell: CellPos, direction: Direction) -> bool {
        match self.passage_slot(cell, direction) {
            Some(Slot::Vertical(r, c)) => {
                self.vertical[r][c] = true;
                true
            }
            Some(Slot::Horizontal(r, c)) => {
                self.horizontal[r][c] = true;
                true
            }
            None => false,
        }
    }

    /// Whether the wall between `cell` and its neighbor in `direction` is removed.
    pub fn is_open(&self, cell: CellPos, direction: Direction) -> bool {
        match self.passage_slot(cell, direction) {
            Some(Slot::Vertical(r, c)) => self.vertical[r][c],
            Some(Slot::Horizontal(r, c)) => self.horizontal[r][c],
            None => false,
        }
    }

    /// Neighbors reachable from `cell` through open passages.
    pub fn open_neighbors(&self, cell: CellPos) -> impl Iterator<Item = CellPos> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| {
            if self.is_open(cell, d) {
                cell.step(d, self.rows, self.columns)
            } else {
                None
            }
        })
    }

    pub fn open_passage_count(&self) -> usize {
        let v = self.vertical.iter().flatten().filter(|&&open| open).count();
        let h = self.horizontal.iter().flatten().filter(|&&open| open).count();
        v + h
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellPos> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellPos::new(row, column)))
    }
}

/// ASCII rendering, two characters per cell:
///
/// ```text
/// +--+--+
/// |     |
/// +--+  +
/// |     |
/// +--+--+
/// ```
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_edge(f)?;
        for r in 0..self.rows {
            f.write_str("|")?;
            for c in 0..self.columns {
                f.write_str("  ")?;
                let open = c + 1 < self.columns && self.vertical[r][c];
                f.write_str(if open { " " } else { "|" })?;
            }
            f.write_str("\n")?;

            if r + 1 < self.rows {
                f.write_str("+")?;
                for c in 0..self.columns {
                    f.write_str(if self.horizontal[r][c] { "  +" } else { "--+" })?;
                }
                f.write_str("\n")?;
            }
        }
        self.write_edge(f)
    }
}

impl Grid {
    fn write_edge(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("+")?;
        for _ in 0..self.columns {
            f.write_str("--+")?;
        }
        f.write_str("\n")
    }
}
