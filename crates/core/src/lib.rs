//! Core maze logic module - pure, deterministic, and testable
//!
//! This module contains maze generation, grid analysis and the arena layout
//! derived from a grid. It has no dependencies on UI, networking, physics or
//! I/O beyond the `log` facade.
//!
//! # Module Structure
//!
//! - [`grid`]: visitation state and the vertical/horizontal passage matrices
//! - [`maze`]: randomized depth-first backtracking generator
//! - [`rng`]: injectable random sources and Fisher–Yates shuffle
//! - [`analysis`]: reachability, perfect-maze check, shortest path
//! - [`layout`]: wall, goal and ball geometry for an arena of a given size
//!
//! # Example
//!
//! ```
//! use tui_maze_core::{analysis, generate, ArenaLayout, SimpleRng};
//!
//! let grid = generate(6, 6, &mut SimpleRng::new(12345)).unwrap();
//! assert!(analysis::is_perfect(&grid));
//!
//! let path = analysis::solve(&grid).unwrap();
//! assert_eq!(path.first().map(|c| (c.row, c.column)), Some((0, 0)));
//!
//! let layout = ArenaLayout::from_grid(&grid, 600.0, 600.0);
//! // A perfect 6x6 maze keeps 60 - 35 = 25 interior walls.
//! assert_eq!(layout.walls.len(), 25);
//! ```

pub mod analysis;
pub mod grid;
pub mod layout;
pub mod maze;
pub mod rng;

pub use tui_maze_types as types;

// Re-export commonly used types for convenience
pub use grid::Grid;
pub use layout::{ArenaLayout, BallSpec, RectSpec};
pub use maze::{carve_from, generate, generate_seeded, MazeError};
pub use rng::{shuffle, FnRandom, RandomSource, SequenceRng, SimpleRng};
