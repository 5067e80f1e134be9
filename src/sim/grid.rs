//! Discrete lane grid
//!
//! The board is 7 columns wide. Lane rows count down from the first stone lane
//! (row 0) to the start lane (row 6); row -1 is the water at the top.
//! Pixel coordinates derive from a cell by scaling with the cell size and
//! adding the art-specific vertical origin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{col_of, row_of};

/// A cell on the lane grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub col: i32,
    pub row: i32,
}

impl GridPosition {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Cell containing a pixel position, for art whose row 0 starts at `origin`
    pub fn from_pixel(pos: Vec2, origin: f32) -> Self {
        Self {
            col: col_of(pos.x),
            row: row_of(pos.y, origin),
        }
    }

    /// Top-left pixel of this cell for art whose row 0 starts at `origin`
    pub fn to_pixel(self, origin: f32) -> Vec2 {
        Vec2::new(
            self.col as f32 * CELL_WIDTH,
            origin + self.row as f32 * CELL_HEIGHT,
        )
    }

    /// Whether the cell lies on the playable board
    pub fn on_board(self) -> bool {
        (0..NUM_COLS).contains(&self.col) && (0..NUM_ROWS).contains(&self.row)
    }

    /// Neighbouring cell one step away
    pub fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

/// Pixel y of a lane row for lane art
#[inline]
pub fn lane_y(row: i32) -> f32 {
    LANE_Y_OFFSET + row as f32 * CELL_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_to_pixel;

    #[test]
    fn test_cell_to_pixel_matches_lane_constants() {
        assert_eq!(cell_to_pixel(0, 0), Vec2::new(0.0, 60.0));
        assert_eq!(cell_to_pixel(3, 3), Vec2::new(303.0, 309.0));
        assert_eq!(lane_y(5), 60.0 + 5.0 * 83.0);
    }

    #[test]
    fn test_from_pixel_floors_into_cell() {
        let pixel = Vec2::new(150.0, 60.0 + 83.0 * 2.0 + 40.0);
        let cell = GridPosition::from_pixel(pixel, LANE_Y_OFFSET);
        assert_eq!(cell, GridPosition::new(1, 2));

        // Just above the first lane belongs to the water row
        let cell = GridPosition::from_pixel(Vec2::new(0.0, 59.0), LANE_Y_OFFSET);
        assert_eq!(cell.row, -1);
    }

    #[test]
    fn test_player_origin_round_trip() {
        let start = GridPosition::new(PLAYER_START_COL, PLAYER_START_ROW);
        let pixel = start.to_pixel(PLAYER_Y_OFFSET);
        // Start cell is (303, 570) in canvas space
        assert_eq!(pixel, Vec2::new(303.0, 570.0));
        assert_eq!(GridPosition::from_pixel(pixel, PLAYER_Y_OFFSET), start);
    }

    #[test]
    fn test_on_board() {
        assert!(GridPosition::new(0, 0).on_board());
        assert!(GridPosition::new(6, 7).on_board());
        assert!(!GridPosition::new(7, 0).on_board());
        assert!(!GridPosition::new(0, GOAL_ROW).on_board());
    }
}
