use crate::math::{Axis, Point2, Transform};
use crate::model::{Room, RoomType};
use crate::scene::{Group, Layer, Node, Primitive, Shape, Style};

use super::SYMBOL_STROKE;

/// Depth of one tread along the direction of travel, in plan units.
pub const STEP_DEPTH: f64 = 1.0;

/// Upper bound on treads, so an absurd room size cannot explode the scene.
const MAX_STEPS: usize = 1024;

/// Returns the number of treads for a run of `length` plan units.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn step_count(length: f64) -> usize {
    let steps = (length / STEP_DEPTH).floor();
    if steps.is_finite() && steps > 0.0 {
        (steps as usize).min(MAX_STEPS)
    } else {
        0
    }
}

/// Builds tread lines for a room of type [`RoomType::Stairs`].
///
/// Travel runs along the longer side of the room's bounding box. The first
/// and last treads are the room boundary itself, so `step_count - 1`
/// interior lines are drawn, evenly spaced and perpendicular to travel.
/// Returns `None` for any other room type.
#[must_use]
pub fn stair_treads(room: &Room) -> Option<Group> {
    if room.room_type != RoomType::Stairs {
        return None;
    }
    let b = room.bounds();
    let axis = b.longer_axis();
    let length = match axis {
        Axis::Horizontal => b.width(),
        Axis::Vertical => b.height(),
    };
    let steps = step_count(length);
    let pen = Style::outline(SYMBOL_STROKE);

    let children = (1..steps)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = length * i as f64 / steps as f64;
            let (from, to) = match axis {
                Axis::Horizontal => (
                    Point2::new(b.min_x + t, b.min_y),
                    Point2::new(b.min_x + t, b.max_y),
                ),
                Axis::Vertical => (
                    Point2::new(b.min_x, b.min_y + t),
                    Point2::new(b.max_x, b.min_y + t),
                ),
            };
            Node::Primitive(Primitive::new(Shape::Line { from, to }, pen))
        })
        .collect();

    Some(Group {
        layer: Layer::Stairs {
            room_id: room.id.clone(),
        },
        transform: Transform::identity(),
        children,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::model::{FloorPlan, Point};

    fn stairs_room(w: f64, h: f64) -> Room {
        let mut room = FloorPlan::sample().room("room-3").unwrap().clone();
        room.polygon = vec![
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ];
        room
    }

    fn tread_lines(group: &Group) -> Vec<(Point2, Point2)> {
        group
            .children
            .iter()
            .map(|n| match n {
                Node::Primitive(Primitive {
                    shape: Shape::Line { from, to },
                    ..
                }) => (*from, *to),
                other => panic!("unexpected node {other:?}"),
            })
            .collect()
    }

    #[test]
    fn sample_stairs_run_vertically() {
        let plan = FloorPlan::sample();
        let group = stair_treads(plan.room("room-3").unwrap()).unwrap();
        let lines = tread_lines(&group);
        // 40 units of travel: 40 treads, 39 interior lines.
        assert_eq!(lines.len(), 39);
        for (from, to) in &lines {
            assert_relative_eq!(from.y, to.y);
            assert_relative_eq!(from.x, 40.0);
            assert_relative_eq!(to.x, 60.0);
        }
        assert_relative_eq!(lines[0].0.y, 43.0);
        assert_relative_eq!(lines[38].0.y, 81.0);
    }

    #[test]
    fn wide_room_runs_horizontally_with_even_spacing() {
        let group = stair_treads(&stairs_room(7.5, 3.0)).unwrap();
        let lines = tread_lines(&group);
        assert_eq!(lines.len(), 6);
        let step = 7.5 / 7.0;
        for (i, (from, to)) in lines.iter().enumerate() {
            assert_relative_eq!(from.x, to.x);
            #[allow(clippy::cast_precision_loss)]
            let expected = step * (i + 1) as f64;
            assert_relative_eq!(from.x, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn other_room_types_have_no_treads() {
        let plan = FloorPlan::sample();
        assert!(stair_treads(plan.room("room-2").unwrap()).is_none());
    }

    #[test]
    fn degenerate_rooms_yield_empty_group() {
        let mut room = stairs_room(0.5, 0.5);
        assert!(stair_treads(&room).unwrap().children.is_empty());
        room.polygon.clear();
        assert!(stair_treads(&room).unwrap().children.is_empty());
    }

    #[test]
    fn step_count_guards_non_finite() {
        assert_eq!(step_count(f64::NAN), 0);
        assert_eq!(step_count(-3.0), 0);
        assert_eq!(step_count(f64::INFINITY), 0);
        assert_eq!(step_count(1e9), MAX_STEPS);
        assert_eq!(step_count(40.0), 40);
    }
}
