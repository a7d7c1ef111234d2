//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! libraries and renders into a framebuffer that is diffed and flushed to the
//! terminal by [`TerminalRenderer`].
//!
//! - [`fb`]: styled character framebuffer
//! - [`arena_view`]: rasterizes arena bodies, hint path and HUD
//! - [`renderer`]: crossterm backend with changed-run diffing

pub mod arena_view;
pub mod fb;
pub mod renderer;

pub use tui_maze_engine as engine;
pub use tui_maze_types as types;

pub use arena_view::{ArenaRect, ArenaView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
