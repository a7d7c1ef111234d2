//! TUI Maze (workspace facade crate).
//!
//! Re-exports the workspace crates under one name, `tui_maze::{core, engine,
//! adapter, term, input, types}`, plus the environment-driven game
//! [`config`].

pub mod config;

pub use tui_maze_adapter as adapter;
pub use tui_maze_core as core;
pub use tui_maze_engine as engine;
pub use tui_maze_input as input;
pub use tui_maze_term as term;
pub use tui_maze_types as types;
