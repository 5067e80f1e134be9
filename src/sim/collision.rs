//! Grid-cell overlap tests
//!
//! Two entities collide when they sit in the same lane row and their
//! horizontal spans intersect. Each span is one cell wide, shrunk by
//! `COLLISION_MARGIN` on both sides, so grazing contact is forgiven.
//!
//! The same predicate answers "has collided now" (zero offset) and
//! "would collide if moved" (offset of one cell in the direction of travel).

use glam::Vec2;

use crate::consts::*;
use crate::row_of;

/// Anything that occupies a grid cell and can be hit
pub trait Collidable {
    /// Top-left pixel of the entity's art
    fn position(&self) -> Vec2;

    /// Pixel y where this entity's art places lane row 0
    fn row_origin(&self) -> f32 {
        LANE_Y_OFFSET
    }

    /// Lane row the entity occupies after shifting by `dy` pixels
    fn row_at(&self, dy: f32) -> i32 {
        row_of(self.position().y + dy, self.row_origin())
    }
}

/// Check whether `a`, shifted by `offset`, overlaps `b`
pub fn overlaps(a: &impl Collidable, b: &impl Collidable, offset: Vec2) -> bool {
    let a_pos = a.position() + offset;
    let b_pos = b.position();
    if !a_pos.is_finite() || !b_pos.is_finite() {
        return false;
    }

    if a.row_at(offset.y) != b.row_at(0.0) {
        return false;
    }

    b_pos.x + CELL_WIDTH - COLLISION_MARGIN >= a_pos.x + COLLISION_MARGIN
        && b_pos.x + COLLISION_MARGIN <= a_pos.x + CELL_WIDTH - COLLISION_MARGIN
}

/// Check whether `a`, shifted by `offset`, overlaps any of `others`
pub fn overlaps_any<'a, C>(
    a: &impl Collidable,
    others: impl IntoIterator<Item = &'a C>,
    offset: Vec2,
) -> bool
where
    C: Collidable + 'a,
{
    others.into_iter().any(|other| overlaps(a, other, offset))
}

/// Index of the first of `others` that `a` overlaps right now
pub fn first_overlap<'a, C>(
    a: &impl Collidable,
    others: impl IntoIterator<Item = &'a C>,
) -> Option<usize>
where
    C: Collidable + 'a,
{
    others
        .into_iter()
        .position(|other| overlaps(a, other, Vec2::ZERO))
}
