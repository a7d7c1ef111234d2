//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the generator, the physics arena, the terminal view and the maze server.
//!
//! # Arena Geometry
//!
//! The arena is measured in world units, y growing downwards. A maze of `rows × columns` cells is stretched over an arena
//! of `width × height` units:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` / `DEFAULT_COLUMNS` | 6 | Cells per axis |
//! | `DEFAULT_ARENA_WIDTH` / `DEFAULT_ARENA_HEIGHT` | 600 | Arena size in units |
//! | `WALL_THICKNESS` | 10 | Thickness of an interior wall |
//! | `BORDER_THICKNESS` | 2 | Thickness of the four arena borders |
//! | `GOAL_SCALE` | 0.7 | Goal size relative to one cell |
//! | `BALL_RADIUS_DIVISOR` | 4 | Ball radius is `min(unit_x, unit_y) / 4` |
//!
//! # Timing
//!
//! The arena steps at a fixed rate. Gameplay velocities are expressed in
//! units per tick, so they are scaled by [`TICKS_PER_SECOND`] before reaching
//! the physics engine.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `NUDGE_SPEED` | 5 | Velocity added per key press (units/tick) |
//! | `COLLAPSE_GRAVITY` | 1000 | Gravity enabled on win (units/s²) |
//!
//! # Examples
//!
//! ```
//! use tui_maze_types::{CellPos, Direction, GameAction, ArenaSettings};
//!
//! let settings = ArenaSettings::default();
//! assert_eq!(settings.unit_x(), 100.0);
//!
//! let cell = CellPos::new(0, 0);
//! assert_eq!(cell.step(Direction::Right, 6, 6), Some(CellPos::new(0, 1)));
//! assert_eq!(cell.step(Direction::Up, 6, 6), None);
//!
//! assert_eq!(GameAction::from_str("nudgeLeft"), Some(GameAction::Nudge(Direction::Left)));
//! ```

/// Default number of maze rows
pub const DEFAULT_ROWS: usize = 6;

/// Default number of maze columns
pub const DEFAULT_COLUMNS: usize = 6;

/// Default arena width in world units
pub const DEFAULT_ARENA_WIDTH: f32 = 600.0;

/// Default arena height in world units
pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

/// Thickness of interior maze walls
pub const WALL_THICKNESS: f32 = 10.0;

/// Thickness of the four arena borders
pub const BORDER_THICKNESS: f32 = 2.0;

/// Goal side length as a fraction of one cell
pub const GOAL_SCALE: f32 = 0.7;

/// Ball radius is `min(unit_x, unit_y) / BALL_RADIUS_DIVISOR`
pub const BALL_RADIUS_DIVISOR: f32 = 4.0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Simulation ticks per second
pub const TICKS_PER_SECOND: f32 = 60.0;

/// Velocity added to the ball per key press, in units per tick
pub const NUDGE_SPEED: f32 = 5.0;

/// Gravity switched on when the maze collapses (units/s², +y is down)
pub const COLLAPSE_GRAVITY: f32 = 1000.0;

/// Linear damping on the ball, close to a 1% per-tick air drag
pub const BALL_LINEAR_DAMPING: f32 = 0.6;

/// The four grid directions.
///
/// The declaration order (up, right, down, left) is the order in which the
/// generator lists neighbor candidates before shuffling them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in candidate order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Row/column offset of one step in this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// A maze cell addressed by (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: usize,
    pub column: usize,
}

impl CellPos {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Step one cell in `direction`, staying inside a `rows × columns` grid.
    ///
    /// Returns `None` when the step would leave the grid.
    pub fn step(&self, direction: Direction, rows: usize, columns: usize) -> Option<CellPos> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let column = self.column.checked_add_signed(dc)?;
        if row >= rows || column >= columns {
            return None;
        }
        Some(CellPos { row, column })
    }

    /// Direction from `self` to an orthogonally adjacent `other`.
    pub fn direction_to(&self, other: CellPos) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| {
            let (dr, dc) = d.delta();
            self.row.checked_add_signed(dr) == Some(other.row)
                && self.column.checked_add_signed(dc) == Some(other.column)
        })
    }
}

/// Player and session actions.
///
/// These are produced by keyboard input and applied to the game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Add `NUDGE_SPEED` to the ball velocity in a direction
    Nudge(Direction),
    /// Rebuild the current maze (same seed) with the ball back at the start
    Restart,
    /// Generate a different maze
    NewMaze,
    /// Show or hide the solution path
    ToggleHint,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    /// Parse action from a camelCase string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_maze_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("nudgeUp"), Some(GameAction::Nudge(Direction::Up)));
    /// assert_eq!(GameAction::from_str("newMaze"), Some(GameAction::NewMaze));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nudgeup" => Some(GameAction::Nudge(Direction::Up)),
            "nudgeright" => Some(GameAction::Nudge(Direction::Right)),
            "nudgedown" => Some(GameAction::Nudge(Direction::Down)),
            "nudgeleft" => Some(GameAction::Nudge(Direction::Left)),
            "restart" => Some(GameAction::Restart),
            "newmaze" => Some(GameAction::NewMaze),
            "togglehint" => Some(GameAction::ToggleHint),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Nudge(Direction::Up) => "nudgeUp",
            GameAction::Nudge(Direction::Right) => "nudgeRight",
            GameAction::Nudge(Direction::Down) => "nudgeDown",
            GameAction::Nudge(Direction::Left) => "nudgeLeft",
            GameAction::Restart => "restart",
            GameAction::NewMaze => "newMaze",
            GameAction::ToggleHint => "toggleHint",
            GameAction::Pause => "pause",
        }
    }
}

/// Label attached to every arena body.
///
/// Collision handling looks bodies up by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    Border,
    Wall,
    Goal,
    Ball,
}

impl BodyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLabel::Border => "border",
            BodyLabel::Wall => "wall",
            BodyLabel::Goal => "goal",
            BodyLabel::Ball => "ball",
        }
    }

    /// Encode into a physics collider's `user_data` slot.
    pub fn to_user_data(&self) -> u128 {
        match self {
            BodyLabel::Border => 1,
            BodyLabel::Wall => 2,
            BodyLabel::Goal => 3,
            BodyLabel::Ball => 4,
        }
    }

    pub fn from_user_data(v: u128) -> Option<Self> {
        match v {
            1 => Some(BodyLabel::Border),
            2 => Some(BodyLabel::Wall),
            3 => Some(BodyLabel::Goal),
            4 => Some(BodyLabel::Ball),
            _ => None,
        }
    }
}

/// Maze dimensions plus the arena size they are stretched over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaSettings {
    pub rows: usize,
    pub columns: usize,
    pub width: f32,
    pub height: f32,
}

impl ArenaSettings {
    pub fn new(rows: usize, columns: usize, width: f32, height: f32) -> Self {
        Self {
            rows,
            columns,
            width,
            height,
        }
    }

    /// Width of one cell in world units.
    pub fn unit_x(&self) -> f32 {
        self.width / self.columns.max(1) as f32
    }

    /// Height of one cell in world units.
    pub fn unit_y(&self) -> f32 {
        self.height / self.rows.max(1) as f32
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_ROWS,
            DEFAULT_COLUMNS,
            DEFAULT_ARENA_WIDTH,
            DEFAULT_ARENA_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_constants() {
        assert_eq!(DEFAULT_ROWS, 6);
        assert_eq!(DEFAULT_COLUMNS, 6);
        assert_eq!(DEFAULT_ARENA_WIDTH, 600.0);
        assert_eq!(DEFAULT_ARENA_HEIGHT, 600.0);
        assert_eq!(WALL_THICKNESS, 10.0);
        assert_eq!(BORDER_THICKNESS, 2.0);
        assert_eq!(NUDGE_SPEED, 5.0);
    }

    #[test]
    fn test_step_stays_inside_grid() {
        let corner = CellPos::new(0, 0);
        assert_eq!(corner.step(Direction::Up, 3, 3), None);
        assert_eq!(corner.step(Direction::Left, 3, 3), None);
        assert_eq!(corner.step(Direction::Down, 3, 3), Some(CellPos::new(1, 0)));

        let far = CellPos::new(2, 2);
        assert_eq!(far.step(Direction::Down, 3, 3), None);
        assert_eq!(far.step(Direction::Right, 3, 3), None);
    }

    #[test]
    fn test_direction_to_adjacent_cells() {
        let c = CellPos::new(1, 1);
        assert_eq!(c.direction_to(CellPos::new(0, 1)), Some(Direction::Up));
        assert_eq!(c.direction_to(CellPos::new(1, 2)), Some(Direction::Right));
        assert_eq!(c.direction_to(CellPos::new(2, 2)), None);
        assert_eq!(c.direction_to(c), None);
    }

    #[test]
    fn test_body_label_user_data_round_trip() {
        for label in [BodyLabel::Border, BodyLabel::Wall, BodyLabel::Goal, BodyLabel::Ball] {
            assert_eq!(BodyLabel::from_user_data(label.to_user_data()), Some(label));
        }
        assert_eq!(BodyLabel::from_user_data(0), None);
    }
}
