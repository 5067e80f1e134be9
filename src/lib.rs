//! Gem Crossing - a lane crossing arcade game
//!
//! Core modules:
//! - `sim`: Game rules (entities, spawning, collisions, loop state machine)
//! - `renderer`: Projection of the game state onto a 2D drawing surface
//! - `platform`: Browser glue that stays testable natively (keys, frame clock)
//! - `audio`: Fire-and-forget sound cues
//! - `settings`: Validated game configuration

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Grid cell dimensions in pixels
    pub const CELL_WIDTH: f32 = 101.0;
    pub const CELL_HEIGHT: f32 = 83.0;
    /// Board columns
    pub const NUM_COLS: i32 = 7;
    /// Lane rows (9 board rows including the bottom UI row)
    pub const NUM_ROWS: i32 = 8;
    /// Pixel y of lane row 0 for lane art (enemies, rocks, gems)
    pub const LANE_Y_OFFSET: f32 = 60.0;
    /// Pixel y of lane row 0 for the player (character art sits 12px lower)
    pub const PLAYER_Y_OFFSET: f32 = 72.0;
    /// Enemies past this x leave the board and respawn
    pub const BOARD_WIDTH: f32 = NUM_COLS as f32 * CELL_WIDTH;

    /// Canvas size
    pub const CANVAS_WIDTH: f64 = 707.0;
    pub const CANVAS_HEIGHT: f64 = 840.0;

    /// Lanes bugs run along (row 3 is the grass rock lane)
    pub const ENEMY_ROWS: [i32; 5] = [0, 1, 2, 4, 5];
    /// Lanes gems can appear on
    pub const GEM_ROWS: [i32; 5] = ENEMY_ROWS;
    /// The grass lane rocks are placed on
    pub const ROCK_ROW: i32 = 3;
    /// Player start cell
    pub const PLAYER_START_COL: i32 = NUM_COLS / 2;
    pub const PLAYER_START_ROW: i32 = 6;
    /// Row above lane 0 (the water); reaching it completes the level
    pub const GOAL_ROW: i32 = -1;

    /// Enemy respawn x range (left of the board)
    pub const ENEMY_SPAWN_X_MIN: f32 = -500.0;
    pub const ENEMY_SPAWN_X_MAX: f32 = -100.0;

    /// Inward hit-box inset on each side
    pub const COLLISION_MARGIN: f32 = 10.0;

    /// Points per completed level on the scoreboard
    pub const LEVEL_POINTS: u32 = 60;
}

/// Top-left pixel of a lane cell
#[inline]
pub fn cell_to_pixel(col: i32, row: i32) -> Vec2 {
    Vec2::new(
        col as f32 * consts::CELL_WIDTH,
        consts::LANE_Y_OFFSET + row as f32 * consts::CELL_HEIGHT,
    )
}

/// Lane row containing pixel `y`, for art whose row 0 starts at `origin`
#[inline]
pub fn row_of(y: f32, origin: f32) -> i32 {
    ((y - origin) / consts::CELL_HEIGHT).floor() as i32
}

/// Column containing pixel `x`
#[inline]
pub fn col_of(x: f32) -> i32 {
    (x / consts::CELL_WIDTH).floor() as i32
}
