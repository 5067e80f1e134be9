//! Game state and entity types
//!
//! Everything the loop mutates lives in `GameState`; collision and rendering
//! only borrow it.

use std::ops::Range;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Collidable, overlaps_any};
use super::grid::{GridPosition, lane_y};
use super::spawn::{self, SpawnError};
use crate::cell_to_pixel;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active play
    Playing,
    /// Player was hit by a bug; scoreboard shown
    Lost,
    /// Player cleared the final level; scoreboard shown
    Won,
}

impl GamePhase {
    /// Whether the scoreboard replaces the entities
    pub fn is_over(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Things that happened since the loop last drained the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player ran into a bug
    Lost,
    /// Player picked up a gem
    GemCollected(GemKind),
    /// Player reached the water; `level` is the new level
    LevelComplete { level: u32 },
    /// Player cleared the final level
    Won,
    /// Fresh game started after a win or loss
    Restarted,
}

/// Movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Cell delta (columns, rows) of one step
    pub fn cell_delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// Pixel delta of one step
    pub fn pixel_delta(self) -> Vec2 {
        let (dcol, drow) = self.cell_delta();
        Vec2::new(dcol as f32 * CELL_WIDTH, drow as f32 * CELL_HEIGHT)
    }
}

/// A bug running left to right along one of the stone lanes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Left edge in pixels (negative while waiting off-board)
    pub x: f32,
    /// Lane row, always one of `ENEMY_ROWS`
    pub row: i32,
    /// Horizontal speed in pixels per second
    pub speed: f32,
}

impl Enemy {
    /// Create a bug at a random off-board position
    pub fn spawn(rng: &mut impl Rng, speed: Range<f32>) -> Self {
        let mut enemy = Self {
            x: ENEMY_SPAWN_X_MIN,
            row: ENEMY_ROWS[0],
            speed: speed.start,
        };
        enemy.reinit(rng, speed);
        enemy
    }

    /// Redraw position, lane and speed
    pub fn reinit(&mut self, rng: &mut impl Rng, speed: Range<f32>) {
        self.x = rng.random_range(ENEMY_SPAWN_X_MIN..ENEMY_SPAWN_X_MAX);
        self.row = ENEMY_ROWS[rng.random_range(0..ENEMY_ROWS.len())];
        self.speed = rng.random_range(speed);
    }

    /// Advance by `dt` seconds, respawning after leaving the right edge
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng, speed: Range<f32>) {
        self.x += self.speed * dt;
        if self.x > BOARD_WIDTH {
            self.reinit(rng, speed);
        }
    }
}

impl Collidable for Enemy {
    fn position(&self) -> Vec2 {
        Vec2::new(self.x, lane_y(self.row))
    }
}

/// Playable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    Princess,
}

impl Character {
    pub const ALL: [Character; 5] = [
        Character::Boy,
        Character::CatGirl,
        Character::HornGirl,
        Character::PinkGirl,
        Character::Princess,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// The player, moving one whole cell per input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub cell: GridPosition,
    pub character: Character,
}

impl Player {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            cell: GridPosition::new(PLAYER_START_COL, PLAYER_START_ROW),
            character: Character::random(rng),
        }
    }

    /// Back to the start cell with a new random character
    pub fn reset(&mut self, rng: &mut impl Rng) {
        *self = Self::new(rng);
    }

    /// Step one cell unless that leaves the board or walks into a rock.
    /// Returns whether the player moved.
    pub fn try_move(&mut self, direction: Direction, rocks: &[Rock]) -> bool {
        let (dcol, drow) = direction.cell_delta();
        let target = self.cell.offset(dcol, drow);
        // The water row above lane 0 is reachable, the UI row below the start is not
        let in_bounds = (target.on_board() && target.row <= PLAYER_START_ROW)
            || (target.row == GOAL_ROW && self.cell.row == 0);
        if !in_bounds || overlaps_any(&*self, rocks, direction.pixel_delta()) {
            return false;
        }

        self.cell = target;
        true
    }

    /// Whether the player has stepped into the water
    pub fn reached_goal(&self) -> bool {
        self.position().y < 0.0
    }
}

impl Collidable for Player {
    fn position(&self) -> Vec2 {
        self.cell.to_pixel(PLAYER_Y_OFFSET)
    }

    fn row_origin(&self) -> f32 {
        PLAYER_Y_OFFSET
    }
}

/// An obstacle on the grass lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rock {
    pub col: i32,
}

impl Rock {
    pub fn new(col: i32) -> Self {
        Self { col }
    }
}

impl Collidable for Rock {
    fn position(&self) -> Vec2 {
        cell_to_pixel(self.col, ROCK_ROW)
    }
}

/// Gem colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemKind {
    Blue,
    Green,
    Orange,
}

impl GemKind {
    pub const ALL: [GemKind; 3] = [GemKind::Blue, GemKind::Green, GemKind::Orange];

    /// Scoreboard value of one gem
    pub fn points(self) -> u32 {
        match self {
            GemKind::Blue => 30,
            GemKind::Green => 40,
            GemKind::Orange => 50,
        }
    }
}

/// A collectible sitting on a stone lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gem {
    pub kind: GemKind,
    pub cell: GridPosition,
}

impl Gem {
    pub fn new(kind: GemKind, cell: GridPosition) -> Self {
        Self { kind, cell }
    }

    /// Move to a uniformly random cell on a gem lane
    pub fn place(&mut self, rng: &mut impl Rng) {
        let col = rng.random_range(0..NUM_COLS);
        let row = GEM_ROWS[rng.random_range(0..GEM_ROWS.len())];
        self.cell = GridPosition::new(col, row);
    }

    /// Same cell as `other` (row and column, not pixels)
    pub fn shares_cell_with(&self, other: &Gem) -> bool {
        self.cell == other.cell
    }
}

impl Collidable for Gem {
    fn position(&self) -> Vec2 {
        cell_to_pixel(self.cell.col, self.cell.row)
    }
}

/// Gems collected this run, per colour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemCounts {
    pub blue: u32,
    pub green: u32,
    pub orange: u32,
}

impl GemCounts {
    pub fn get(&self, kind: GemKind) -> u32 {
        match kind {
            GemKind::Blue => self.blue,
            GemKind::Green => self.green,
            GemKind::Orange => self.orange,
        }
    }

    pub fn collect(&mut self, kind: GemKind) {
        match kind {
            GemKind::Blue => self.blue += 1,
            GemKind::Green => self.green += 1,
            GemKind::Orange => self.orange += 1,
        }
    }
}

/// Scoreboard lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub level: u32,
    pub level_points: u32,
    pub gems: GemCounts,
    pub total: u32,
}

impl ScoreBreakdown {
    pub fn new(level: u32, gems: GemCounts) -> Self {
        let level_points = level * LEVEL_POINTS;
        let gem_points: u32 = GemKind::ALL
            .iter()
            .map(|&kind| gems.get(kind) * kind.points())
            .sum();
        Self {
            level,
            level_points,
            gems,
            total: level_points + gem_points,
        }
    }

    /// Points contributed by one gem colour
    pub fn gem_points(&self, kind: GemKind) -> u32 {
        self.gems.get(kind) * kind.points()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Configuration in force for this run
    pub settings: Settings,
    /// Current level
    pub level: u32,
    /// Gems collected this run
    pub gems_collected: GemCounts,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub rocks: Vec<Rock>,
    pub gems: Vec<Gem>,
    /// Events not yet consumed by the loop
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new game at the configured starting level
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SpawnError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::new(&mut rng);
        let mut state = Self {
            seed,
            level: settings.start_level,
            settings,
            gems_collected: GemCounts::default(),
            phase: GamePhase::Playing,
            player,
            enemies: Vec::new(),
            rocks: Vec::new(),
            gems: Vec::new(),
            events: Vec::new(),
            rng,
        };
        state.populate(true)?;
        Ok(state)
    }

    /// Back to the starting level with counters zeroed and every list rebuilt.
    /// On error the finished game is left as it was.
    pub fn restart(&mut self) -> Result<(), SpawnError> {
        self.enter_level(self.settings.start_level, true)?;
        self.gems_collected = GemCounts::default();
        self.phase = GamePhase::Playing;
        self.player.reset(&mut self.rng);
        Ok(())
    }

    /// Regenerate gems and rocks and top up enemies for the current level
    pub fn populate(&mut self, hard_reset: bool) -> Result<(), SpawnError> {
        self.enter_level(self.level, hard_reset)
    }

    /// Switch to `level` with a freshly generated board. Gems and rocks are
    /// built first and committed together with the level only if both
    /// succeed; enemies are topped up afterwards.
    pub fn enter_level(&mut self, level: u32, hard_reset: bool) -> Result<(), SpawnError> {
        let gems = spawn::spawn_gems(level, &self.settings, &mut self.rng)?;
        let rocks = spawn::spawn_rocks(level, &self.settings, &mut self.rng)?;

        self.level = level;
        self.gems = gems;
        self.rocks = rocks;
        spawn::spawn_enemies(
            &mut self.enemies,
            level,
            &self.settings,
            &mut self.rng,
            hard_reset,
        );
        log::debug!(
            "Level {}: {} enemies, {} rocks, {} gems",
            level,
            self.enemies.len(),
            self.rocks.len(),
            self.gems.len()
        );
        Ok(())
    }

    pub fn score(&self) -> ScoreBreakdown {
        ScoreBreakdown::new(self.level, self.gems_collected)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
