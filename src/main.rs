//! Terminal maze runner (default binary).
//!
//! Nudge the ball through the maze with the arrow keys. Reaching the goal
//! collapses the walls under gravity.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use tui_maze::config::GameConfig;
use tui_maze::engine::MazeGame;
use tui_maze::input::{handle_key_event, should_quit};
use tui_maze::term::{ArenaView, FrameBuffer, TerminalRenderer, Viewport};
use tui_maze::types::TICK_MS;

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    init_logging(&config)?;

    let mut game = MazeGame::new(config.settings, config.seed_or_random())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to `MAZE_LOG_PATH` when set. Without it only warnings reach
/// stderr, which would otherwise scribble over the alternate screen.
fn init_logging(config: &GameConfig) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &config.log_path {
        let file = File::create(path).with_context(|| format!("failed to open log file {}", path))?;
        builder
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut MazeGame) -> Result<()> {
    let view = ArenaView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
