//! Arena engine - physics world and game session.
//!
//! The maze itself comes from `tui-maze-core`; this crate turns it into
//! something to play. Physics is delegated to rapier2d.
//!
//! - [`world`]: rapier2d world built from an [`ArenaLayout`](crate::core::ArenaLayout)
//! - [`session`]: [`MazeGame`], the fixed-timestep session driven by the binary

pub mod session;
pub mod world;

pub use tui_maze_core as core;
pub use tui_maze_types as types;

pub use session::{ArenaSnapshot, MazeGame};
pub use world::{ArenaWorld, BodyShape, BodyView, StepOutcome};
