//! Arena layout: converts a generated grid into body specs for the physics world.
//!
//! With `unit_x = width / columns` and `unit_y = height / rows`:
//!
//! | Body | Center | Size |
//! |------|--------|------|
//! | closed horizontal `[r][c]` | `(c·unit_x + unit_x/2, r·unit_y + unit_y)` | `unit_x × 10` |
//! | closed vertical `[r][c]` | `(c·unit_x + unit_x, r·unit_y + unit_y/2)` | `10 × unit_y` |
//! | goal | `(width − unit_x/2, height − unit_y/2)` | `0.7·unit_x × 0.7·unit_y` |
//! | ball | `(unit_x/2, unit_y/2)` | radius `min(unit_x, unit_y)/4` |
//!
//! Coordinates grow right and down.

use crate::grid::Grid;
use crate::types::{
    ArenaSettings, BodyLabel, CellPos, BALL_RADIUS_DIVISOR, BORDER_THICKNESS, GOAL_SCALE,
    WALL_THICKNESS,
};

/// Axis-aligned rectangle body, described by its center and full size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectSpec {
    pub label: BodyLabel,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectSpec {
    pub fn new(label: BodyLabel, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            label,
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSpec {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Every body the arena needs, derived from one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaLayout {
    pub settings: ArenaSettings,
    pub borders: Vec<RectSpec>,
    pub walls: Vec<RectSpec>,
    pub goal: RectSpec,
    pub ball: BallSpec,
}

impl ArenaLayout {
    pub fn from_grid(grid: &Grid, width: f32, height: f32) -> Self {
        let settings = ArenaSettings::new(grid.rows(), grid.columns(), width, height);
        let unit_x = settings.unit_x();
        let unit_y = settings.unit_y();

        let borders = vec![
            RectSpec::new(BodyLabel::Border, width / 2.0, 0.0, width, BORDER_THICKNESS),
            RectSpec::new(BodyLabel::Border, width / 2.0, height, width, BORDER_THICKNESS),
            RectSpec::new(BodyLabel::Border, 0.0, height / 2.0, BORDER_THICKNESS, height),
            RectSpec::new(BodyLabel::Border, width, height / 2.0, BORDER_THICKNESS, height),
        ];

        let mut walls = Vec::new();
        for (r, row) in grid.horizontal_passages().iter().enumerate() {
            for (c, &open) in row.iter().enumerate() {
                if open {
                    continue;
                }
                walls.push(RectSpec::new(
                    BodyLabel::Wall,
                    c as f32 * unit_x + unit_x / 2.0,
                    r as f32 * unit_y + unit_y,
                    unit_x,
                    WALL_THICKNESS,
                ));
            }
        }
        for (r, row) in grid.vertical_passages().iter().enumerate() {
            for (c, &open) in row.iter().enumerate() {
                if open {
                    continue;
                }
                walls.push(RectSpec::new(
                    BodyLabel::Wall,
                    c as f32 * unit_x + unit_x,
                    r as f32 * unit_y + unit_y / 2.0,
                    WALL_THICKNESS,
                    unit_y,
                ));
            }
        }

        let goal = RectSpec::new(
            BodyLabel::Goal,
            width - unit_x / 2.0,
            height - unit_y / 2.0,
            unit_x * GOAL_SCALE,
            unit_y * GOAL_SCALE,
        );

        let ball = BallSpec {
            x: unit_x / 2.0,
            y: unit_y / 2.0,
            radius: unit_x.min(unit_y) / BALL_RADIUS_DIVISOR,
        };

        Self {
            settings,
            borders,
            walls,
            goal,
            ball,
        }
    }
}

/// World-space center of a cell.
pub fn cell_center(settings: &ArenaSettings, cell: CellPos) -> (f32, f32) {
    let unit_x = settings.unit_x();
    let unit_y = settings.unit_y();
    (
        cell.column as f32 * unit_x + unit_x / 2.0,
        cell.row as f32 * unit_y + unit_y / 2.0,
    )
}

/// Cell containing a world-space point, clamped into the grid.
pub fn cell_at(settings: &ArenaSettings, x: f32, y: f32) -> CellPos {
    let clamp = |v: f32, n: usize| -> usize {
        if v <= 0.0 || n == 0 {
            0
        } else {
            (v as usize).min(n - 1)
        }
    };
    CellPos::new(
        clamp(y / settings.unit_y(), settings.rows),
        clamp(x / settings.unit_x(), settings.columns),
    )
}
