use crate::math::{compute_bounds, Point2, Transform};

use super::plan::{Furniture, Opening, Point};

/// Label size used when a room has too few vertices to measure.
pub const DEFAULT_LABEL_SIZE: f64 = 2.5;

const MIN_LABEL_SIZE: f64 = 1.5;
const MAX_LABEL_SIZE: f64 = 4.0;

/// Position and orientation of a wall segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallAnchor {
    /// Arithmetic mean of the two endpoints.
    pub midpoint: Point2,
    /// `atan2(dy, dx)` in degrees, in `(-180, 180]`.
    pub angle: f64,
    /// Segment length.
    pub length: f64,
}

/// Returns the placement transform of a furniture piece.
///
/// Translates to `position`, then rotates by `rotation` degrees about the
/// piece's own center `(width / 2, height / 2)`. The order is fixed:
/// rotating first would move the pivot and misplace the symbol.
#[must_use]
pub fn transform_for(furniture: &Furniture) -> Transform {
    Transform::identity()
        .translate(furniture.position.x, furniture.position.y)
        .rotate_about(
            furniture.rotation,
            Point2::new(furniture.width * 0.5, furniture.height * 0.5),
        )
}

/// Picks a label size from the room's smaller bounding-box side.
///
/// `min(4, max(1.5, min(width, height) / 6))`, so labels shrink on small
/// rooms and cap out on large ones. Rings with fewer than 3 vertices get
/// [`DEFAULT_LABEL_SIZE`].
#[must_use]
pub fn auto_font_size(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return DEFAULT_LABEL_SIZE;
    }
    let ring: Vec<Point2> = polygon.iter().copied().map(Point2::from).collect();
    let smaller = compute_bounds(&ring).min_side();
    (smaller / 6.0).clamp(MIN_LABEL_SIZE, MAX_LABEL_SIZE)
}

/// Returns the midpoint and direction of the wall an opening sits on.
#[must_use]
pub fn wall_midpoint_and_angle(opening: &Opening) -> WallAnchor {
    let a = Point2::from(opening.wall_start);
    let b = Point2::from(opening.wall_end);
    let d = b - a;
    WallAnchor {
        midpoint: Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5),
        angle: d.y.atan2(d.x).to_degrees(),
        length: d.norm(),
    }
}
