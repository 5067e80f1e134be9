//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Enemies advance on a fixed timestep, the player on discrete commands
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collidable, first_overlap, overlaps, overlaps_any};
pub use grid::{GridPosition, lane_y};
pub use spawn::{SpawnError, enemy_count, gem_kinds, rock_count};
pub use state::{
    Character, Direction, Enemy, GameEvent, GamePhase, GameState, Gem, GemCounts, GemKind, Player,
    Rock, ScoreBreakdown,
};
pub use tick::{Command, handle_command, tick};
