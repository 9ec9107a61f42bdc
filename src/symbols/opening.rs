use crate::math::{Point2, Transform};
use crate::model::{wall_midpoint_and_angle, Opening, OpeningKind};
use crate::scene::{Group, Layer, Node, Paint, Primitive, Shape, Style};

use super::{finite_or_zero, SYMBOL_STROKE};

/// Width of the wall span a door removes, in plan units.
pub const DOOR_WIDTH: f64 = 3.0;

/// Width of the wall span a window removes, in plan units.
pub const WINDOW_WIDTH: f64 = 4.0;

/// Builds the symbol for a door or window.
///
/// The group is anchored at the wall midpoint and rotated to the wall
/// angle, so local `x` runs along the wall and local `y` across it. The
/// opening is drawn at its literal segment whether or not that segment is
/// an edge of the room polygon.
#[must_use]
pub fn opening_symbol(
    kind: OpeningKind,
    opening: &Opening,
    room_id: &str,
    wall_thickness: f64,
) -> Group {
    let anchor = wall_midpoint_and_angle(opening);
    let transform = Transform::identity()
        .translate(
            finite_or_zero(anchor.midpoint.x),
            finite_or_zero(anchor.midpoint.y),
        )
        .rotate_about(finite_or_zero(anchor.angle), Point2::origin());
    let children = match kind {
        OpeningKind::Door => door(DOOR_WIDTH, wall_thickness),
        OpeningKind::Window => window(WINDOW_WIDTH, wall_thickness),
    };
    Group {
        layer: Layer::Opening {
            kind,
            room_id: room_id.to_owned(),
        },
        transform,
        children: children.into_iter().map(Node::Primitive).collect(),
    }
}

/// Paper-colored block covering `width` of wall, centered on the origin.
fn erase(width: f64, wall_thickness: f64) -> Primitive {
    Primitive::new(
        Shape::Rect {
            origin: Point2::new(-width * 0.5, -wall_thickness),
            width,
            height: wall_thickness * 2.0,
            corner: 0.0,
        },
        Style::fill(Paint::Paper),
    )
}

/// Erased span, leaf at the hinge and a quarter-circle swing.
///
/// The hinge is always at local `-x` and the leaf always swings toward
/// local `+y`; the interior side of the wall is not consulted.
fn door(width: f64, wall_thickness: f64) -> Vec<Primitive> {
    let half = width * 0.5;
    let pen = Style::outline(SYMBOL_STROKE);
    vec![
        erase(width, wall_thickness),
        Primitive::new(
            Shape::Line {
                from: Point2::new(-half, 0.0),
                to: Point2::new(-half, width),
            },
            pen,
        ),
        Primitive::new(
            Shape::Arc {
                from: Point2::new(half, 0.0),
                to: Point2::new(-half, width),
                radius: width,
                clockwise: true,
            },
            pen,
        ),
    ]
}

fn window(width: f64, wall_thickness: f64) -> Vec<Primitive> {
    let half = width * 0.5;
    let sill = wall_thickness * 0.5;
    let pen = Style::outline(SYMBOL_STROKE);
    vec![
        erase(width, wall_thickness),
        Primitive::new(
            Shape::Rect {
                origin: Point2::new(-half, -sill * 0.5),
                width,
                height: sill,
                corner: 0.0,
            },
            pen,
        ),
        Primitive::new(
            Shape::Line {
                from: Point2::new(-half, 0.0),
                to: Point2::new(half, 0.0),
            },
            pen,
        ),
    ]
}
