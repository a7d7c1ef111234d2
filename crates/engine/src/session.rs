//! Game session - owns one maze, its arena and the player-facing state
//!
//! The session runs the arena at a fixed timestep: callers feed elapsed wall
//! time into [`MazeGame::tick`] and the world advances in whole `TICK_MS` steps.

use crate::core::{
    analysis, generate_seeded, layout::cell_at, ArenaLayout, Grid, MazeError, SimpleRng,
};
use crate::types::{ArenaSettings, CellPos, GameAction, TICK_MS};
use crate::world::{ArenaWorld, BodyView, StepOutcome};

/// Steps run per `tick` call at most, so a long stall does not freeze the loop.
const MAX_STEPS_PER_TICK: u32 = 8;

/// Everything a view needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaSnapshot {
    pub settings: ArenaSettings,
    pub seed: u32,
    pub episode_id: u32,
    pub bodies: Vec<BodyView>,
    pub moves: u32,
    pub steps: u64,
    pub paused: bool,
    pub won: bool,
    pub show_hint: bool,
    /// Remaining path from the ball's cell to the goal, empty unless the hint is on.
    pub hint: Vec<CellPos>,
    pub ball_cell: CellPos,
}

/// A playable maze.
pub struct MazeGame {
    settings: ArenaSettings,
    seed: u32,
    seeds: SimpleRng,
    grid: Grid,
    layout: ArenaLayout,
    world: ArenaWorld,
    episode_id: u32,
    moves: u32,
    paused: bool,
    show_hint: bool,
    won_at_step: Option<u64>,
    accumulator_ms: u32,
}

impl MazeGame {
    /// Create a session for `settings.rows × settings.columns`, seeded with `seed`.
    pub fn new(settings: ArenaSettings, seed: u32) -> Result<Self, MazeError> {
        let grid = generate_seeded(settings.rows, settings.columns, seed)?;
        let layout = ArenaLayout::from_grid(&grid, settings.width, settings.height);
        let world = ArenaWorld::new(&layout);
        log::info!(
            "[Game] new {}x{} maze, seed {}",
            settings.rows,
            settings.columns,
            seed
        );
        Ok(Self {
            settings,
            seed,
            seeds: SimpleRng::new(seed),
            grid,
            layout,
            world,
            episode_id: 0,
            moves: 0,
            paused: false,
            show_hint: false,
            won_at_step: None,
            accumulator_ms: 0,
        })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &ArenaLayout {
        &self.layout
    }

    pub fn world(&self) -> &ArenaWorld {
        &self.world
    }

    pub fn settings(&self) -> &ArenaSettings {
        &self.settings
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn won(&self) -> bool {
        self.won_at_step.is_some()
    }

    pub fn show_hint(&self) -> bool {
        self.show_hint
    }

    /// Cell currently containing the ball's center.
    pub fn ball_cell(&self) -> CellPos {
        let (x, y) = self.world.ball_position();
        cell_at(&self.settings, x, y)
    }

    /// Rebuild grid, layout and world from `seed`, keeping the session RNG.
    fn rebuild(&mut self, seed: u32) -> Result<(), MazeError> {
        let grid = generate_seeded(self.settings.rows, self.settings.columns, seed)?;
        self.layout = ArenaLayout::from_grid(&grid, self.settings.width, self.settings.height);
        self.world = ArenaWorld::new(&self.layout);
        self.grid = grid;
        self.seed = seed;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.moves = 0;
        self.paused = false;
        self.won_at_step = None;
        self.accumulator_ms = 0;
        Ok(())
    }

    /// Apply a game action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Nudge(direction) => {
                if self.paused {
                    return false;
                }
                self.world.nudge(direction);
                if !self.won() {
                    self.moves = self.moves.saturating_add(1);
                }
                true
            }
            GameAction::Pause => {
                self.paused = !self.paused;
                true
            }
            GameAction::ToggleHint => {
                self.show_hint = !self.show_hint;
                true
            }
            GameAction::Restart => self.rebuild(self.seed).is_ok(),
            GameAction::NewMaze => {
                let seed = self.seeds.next_u32();
                log::info!("[Game] new maze, seed {}", seed);
                self.rebuild(seed).is_ok()
            }
        }
    }

    /// Advance the arena by `elapsed_ms` of wall time.
    ///
    /// Returns true when at least one fixed step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused {
            return false;
        }

        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        let mut stepped = 0;
        while self.accumulator_ms >= TICK_MS && stepped < MAX_STEPS_PER_TICK {
            self.accumulator_ms -= TICK_MS;
            stepped += 1;
            if self.world.step() == StepOutcome::GoalReached && self.won_at_step.is_none() {
                self.won_at_step = Some(self.world.steps());
                log::info!(
                    "[Game] solved seed {} in {} moves",
                    self.seed,
                    self.moves
                );
            }
        }
        if stepped == MAX_STEPS_PER_TICK {
            self.accumulator_ms = self.accumulator_ms.min(TICK_MS);
        }
        stepped > 0
    }

    /// Path from the ball's cell to the goal cell.
    pub fn hint_path(&self) -> Vec<CellPos> {
        let goal = CellPos::new(
            self.settings.rows.saturating_sub(1),
            self.settings.columns.saturating_sub(1),
        );
        analysis::shortest_path(&self.grid, self.ball_cell(), goal).unwrap_or_default()
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        let hint = if self.show_hint && !self.won() {
            self.hint_path()
        } else {
            Vec::new()
        };
        ArenaSnapshot {
            settings: self.settings,
            seed: self.seed,
            episode_id: self.episode_id,
            bodies: self.world.bodies(),
            moves: self.moves,
            steps: self.world.steps(),
            paused: self.paused,
            won: self.won(),
            show_hint: self.show_hint,
            hint,
            ball_cell: self.ball_cell(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BodyLabel, Direction};

    fn small() -> MazeGame {
        MazeGame::new(ArenaSettings::new(4, 4, 400.0, 400.0), 12345).unwrap()
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert!(MazeGame::new(ArenaSettings::new(0, 3, 300.0, 300.0), 1).is_err());
    }

    #[test]
    fn test_tick_runs_whole_steps_only() {
        let mut game = small();
        assert!(!game.tick(TICK_MS - 1));
        assert_eq!(game.world().steps(), 0);
        assert!(game.tick(1));
        assert_eq!(game.world().steps(), 1);
    }

    #[test]
    fn test_tick_caps_steps_after_a_stall() {
        let mut game = small();
        game.tick(10_000);
        assert_eq!(game.world().steps(), MAX_STEPS_PER_TICK as u64);
    }

    #[test]
    fn test_pause_blocks_ticks_and_nudges() {
        let mut game = small();
        assert!(game.apply_action(GameAction::Pause));
        assert!(!game.apply_action(GameAction::Nudge(Direction::Right)));
        assert!(!game.tick(100));
        assert_eq!(game.moves(), 0);
        game.apply_action(GameAction::Pause);
        assert!(game.apply_action(GameAction::Nudge(Direction::Right)));
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_restart_keeps_seed_and_maze() {
        let mut game = small();
        let grid = game.grid().clone();
        game.apply_action(GameAction::Nudge(Direction::Down));
        game.tick(TICK_MS * 4);
        assert!(game.apply_action(GameAction::Restart));
        assert_eq!(game.seed(), 12345);
        assert_eq!(game.grid(), &grid);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.episode_id(), 1);
        assert_eq!(game.world().steps(), 0);
    }

    #[test]
    fn test_new_maze_draws_a_new_seed() {
        let mut game = small();
        assert!(game.apply_action(GameAction::NewMaze));
        assert_ne!(game.seed(), 12345);

        // The sequence of follow-up seeds is itself reproducible.
        let mut other = small();
        other.apply_action(GameAction::NewMaze);
        assert_eq!(game.seed(), other.seed());
    }

    #[test]
    fn test_hint_starts_at_ball_and_ends_at_goal() {
        let mut game = small();
        assert!(game.snapshot().hint.is_empty());
        game.apply_action(GameAction::ToggleHint);
        let snap = game.snapshot();
        assert_eq!(snap.hint.first(), Some(&CellPos::new(0, 0)));
        assert_eq!(snap.hint.last(), Some(&CellPos::new(3, 3)));
    }

    #[test]
    fn test_snapshot_reports_bodies() {
        let game = small();
        let snap = game.snapshot();
        assert_eq!(snap.seed, 12345);
        assert!(!snap.won);
        assert_eq!(snap.ball_cell, CellPos::new(0, 0));
        assert_eq!(
            snap.bodies.iter().filter(|b| b.label == BodyLabel::Goal).count(),
            1
        );
    }

    #[test]
    fn test_single_cell_maze_is_won_on_first_touch() {
        // In a 1x1 maze the ball overlaps the goal from the start.
        let mut game = MazeGame::new(ArenaSettings::new(1, 1, 100.0, 100.0), 3).unwrap();
        game.tick(TICK_MS * 2);
        assert!(game.won());
        assert!(game.world().collapsed());
    }
}
