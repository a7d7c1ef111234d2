//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`]s for the maze session.

pub mod map;

pub use tui_maze_types as types;

pub use map::{handle_key_event, should_quit};
