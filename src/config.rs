//! Game configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MAZE_ROWS` / `MAZE_COLUMNS` | 6 | Maze size in cells, at most [`MAX_CELLS`] in total |
//! | `MAZE_WIDTH` / `MAZE_HEIGHT` | 600 | Arena size in world units |
//! | `MAZE_SEED` | random | Seed for the first maze |
//! | `MAZE_LOG_PATH` | unset | Write logs to this file instead of stderr |

use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::types::{ArenaSettings, DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Largest `rows * columns` the game accepts, same as the server default.
pub const MAX_CELLS: usize = 250_000;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameConfig {
    pub settings: ArenaSettings,
    pub seed: Option<u32>,
    pub log_path: Option<String>,
}

impl GameConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables take
    /// their default; set but invalid ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let rows = parse_or(get("MAZE_ROWS"), "MAZE_ROWS", DEFAULT_ROWS)?;
        let columns = parse_or(get("MAZE_COLUMNS"), "MAZE_COLUMNS", DEFAULT_COLUMNS)?;
        if rows == 0 || columns == 0 {
            bail!("MAZE_ROWS and MAZE_COLUMNS must be at least 1 (got {}x{})", rows, columns);
        }
        match rows.checked_mul(columns) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => bail!("{}x{} maze exceeds the limit of {} cells", rows, columns, MAX_CELLS),
        }

        let width = parse_or(get("MAZE_WIDTH"), "MAZE_WIDTH", DEFAULT_ARENA_WIDTH)?;
        let height = parse_or(get("MAZE_HEIGHT"), "MAZE_HEIGHT", DEFAULT_ARENA_HEIGHT)?;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            bail!("MAZE_WIDTH and MAZE_HEIGHT must be positive (got {}x{})", width, height);
        }

        let seed = get("MAZE_SEED")
            .map(|s| s.parse::<u32>().with_context(|| format!("MAZE_SEED is not a u32: {:?}", s)))
            .transpose()?;

        Ok(Self {
            settings: ArenaSettings::new(rows, columns, width, height),
            seed,
            log_path: get("MAZE_LOG_PATH"),
        })
    }

    /// The configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => v
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, v)),
        None => Ok(default),
    }
}
