//! Fixed timestep simulation tick and input handling
//!
//! Enemies move on the clock; the player moves on discrete commands. A loss is
//! only ever detected by `tick`, goal and gem checks only by `handle_command`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{first_overlap, overlaps_any};
use super::spawn::SpawnError;
use super::state::{Direction, GameEvent, GamePhase, GameState};

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Step one cell
    Move(Direction),
    /// Start over from the scoreboard
    Restart,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    // Bugs freeze behind the scoreboard
    if state.phase != GamePhase::Playing {
        return;
    }

    let speed = state.settings.enemy_speed_range();
    for enemy in &mut state.enemies {
        enemy.update(dt, &mut state.rng, speed.clone());
    }

    if overlaps_any(&state.player, &state.enemies, Vec2::ZERO) {
        state.phase = GamePhase::Lost;
        state.events.push(GameEvent::Lost);
        log::info!(
            "Hit by a bug on level {} at {:?}",
            state.level,
            state.player.cell
        );
    }
}

/// Apply one player command
pub fn handle_command(state: &mut GameState, command: Command) -> Result<(), SpawnError> {
    match command {
        Command::Move(direction) => {
            if state.phase != GamePhase::Playing {
                return Ok(());
            }
            state.player.try_move(direction, &state.rocks);
            collect_gem(state);
            if state.player.reached_goal() {
                advance_level(state)?;
            }
        }
        Command::Restart => {
            if !state.phase.is_over() {
                return Ok(());
            }
            state.restart()?;
            state.events.push(GameEvent::Restarted);
            log::info!("Restarted at level {}", state.level);
        }
    }
    Ok(())
}

/// Pick up the first gem under the player, if any
fn collect_gem(state: &mut GameState) {
    let Some(index) = first_overlap(&state.player, &state.gems) else {
        return;
    };
    let gem = state.gems.remove(index);
    state.gems_collected.collect(gem.kind);
    state.events.push(GameEvent::GemCollected(gem.kind));
    log::debug!("Collected {:?} gem at {:?}", gem.kind, gem.cell);
}

/// Move on to the next level, or end the game after the last one. If the next
/// board can't be generated the level is unchanged and the player stays put.
fn advance_level(state: &mut GameState) -> Result<(), SpawnError> {
    let next = state.level + 1;

    if next >= state.settings.max_level {
        state.level = next;
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Won at level {} (score {})", state.level, state.score().total);
        return Ok(());
    }

    state.enter_level(next, false)?;
    state.player.reset(&mut state.rng);
    state.events.push(GameEvent::LevelComplete { level: next });
    log::info!("Level complete, now on level {}", next);
    Ok(())
}
