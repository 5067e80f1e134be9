//! Level population
//!
//! Enemy counts only ever grow between levels; rocks and gems are rebuilt
//! from scratch on every call. Random placement uses rejection sampling with
//! a bounded number of draws so an impossible configuration fails loudly
//! instead of spinning forever.

use rand::Rng;
use thiserror::Error;

use super::grid::GridPosition;
use super::state::{Enemy, Gem, GemKind, Rock};
use crate::consts::*;
use crate::settings::Settings;

/// Level generation failures (always caused by configuration)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("could not place {wanted} {what} after {attempts} draws")]
    RetriesExhausted {
        what: &'static str,
        wanted: usize,
        attempts: u32,
    },
}

/// Number of bugs on the board at `level`
pub fn enemy_count(level: u32, settings: &Settings) -> usize {
    (level as usize + 3).min(settings.max_enemies)
}

/// Number of rocks on the grass lane at `level`
pub fn rock_count(level: u32, settings: &Settings) -> usize {
    (level as usize / 2).min(settings.max_rocks)
}

/// Gem colours on offer at `level`
pub fn gem_kinds(level: u32) -> Vec<GemKind> {
    let mut kinds = vec![GemKind::Blue];
    if level > 5 {
        kinds.push(GemKind::Green);
    }
    if level > 10 {
        kinds.push(GemKind::Orange);
    }
    kinds
}

/// Top up `enemies` to the count for `level`. Never removes bugs unless
/// `hard_reset` clears the list first.
pub fn spawn_enemies(
    enemies: &mut Vec<Enemy>,
    level: u32,
    settings: &Settings,
    rng: &mut impl Rng,
    hard_reset: bool,
) {
    if hard_reset {
        enemies.clear();
    }
    let target = enemy_count(level, settings);
    while enemies.len() < target {
        enemies.push(Enemy::spawn(rng, settings.enemy_speed_range()));
    }
}

/// Build the rock lane for `level` at distinct columns
pub fn spawn_rocks(
    level: u32,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Result<Vec<Rock>, SpawnError> {
    let wanted = rock_count(level, settings);
    let mut columns: Vec<i32> = Vec::with_capacity(wanted);
    let mut attempts = 0;

    while columns.len() < wanted {
        if attempts >= settings.max_spawn_retries {
            return Err(SpawnError::RetriesExhausted {
                what: "rocks",
                wanted,
                attempts,
            });
        }
        attempts += 1;

        let col = rng.random_range(0..NUM_COLS);
        if !columns.contains(&col) {
            columns.push(col);
        }
    }

    Ok(columns.into_iter().map(Rock::new).collect())
}

/// Build the gems for `level`, no two sharing a cell
pub fn spawn_gems(
    level: u32,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Result<Vec<Gem>, SpawnError> {
    let kinds = gem_kinds(level);
    let wanted = kinds.len();
    let mut gems: Vec<Gem> = Vec::with_capacity(wanted);
    let mut attempts = 0;

    for kind in kinds {
        let mut gem = Gem::new(kind, GridPosition::new(0, 0));
        loop {
            if attempts >= settings.max_spawn_retries {
                return Err(SpawnError::RetriesExhausted {
                    what: "gems",
                    wanted,
                    attempts,
                });
            }
            attempts += 1;

            gem.place(rng);
            if !gems.iter().any(|placed| placed.shares_cell_with(&gem)) {
                break;
            }
        }
        gems.push(gem);
    }

    Ok(gems)
}
