use crate::math::polygon_2d::contains_point;
use crate::math::Point2;

use super::node::{Group, Layer, Node, Scene};

/// Returns the id of the room under `point`, in scene coordinates.
///
/// Groups are tested topmost first. A furniture piece occludes whatever
/// room lies beneath it, so a click on furniture selects nothing. Labels,
/// stair treads, openings and the grid never capture a click.
#[must_use]
pub fn pick_room(scene: &Scene, point: Point2) -> Option<&str> {
    for node in scene.nodes.iter().rev() {
        let Node::Group(group) = node else {
            continue;
        };
        match hit(group, &point) {
            Hit::Room(id) => return Some(id),
            Hit::Occluded => return None,
            Hit::Miss => {}
        }
    }
    None
}

enum Hit<'a> {
    Room(&'a str),
    Occluded,
    Miss,
}

fn hit<'a>(group: &'a Group, point: &Point2) -> Hit<'a> {
    let Some(local) = group.transform.apply_inverse(point) else {
        return Hit::Miss;
    };
    match &group.layer {
        Layer::Furniture { width, height, .. } => {
            if (0.0..=*width).contains(&local.x) && (0.0..=*height).contains(&local.y) {
                Hit::Occluded
            } else {
                Hit::Miss
            }
        }
        Layer::Room { .. } => group
            .children
            .iter()
            .rev()
            .find_map(|child| match child {
                Node::Room(shape) if contains_point(&shape.ring, &local) => {
                    Some(Hit::Room(shape.id.as_str()))
                }
                _ => None,
            })
            .unwrap_or(Hit::Miss),
        Layer::Background | Layer::Stairs { .. } | Layer::Openings | Layer::Opening { .. } => {
            Hit::Miss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FloorPlan;
    use crate::scene::{compose_scene, ViewState};

    fn scene() -> Scene {
        compose_scene(&FloorPlan::sample(), &ViewState::default())
    }

    #[test]
    fn picks_room_under_point() {
        let scene = scene();
        assert_eq!(pick_room(&scene, Point2::new(30.0, 25.0)), Some("room-1"));
        assert_eq!(pick_room(&scene, Point2::new(30.0, 60.0)), Some("room-2"));
        assert_eq!(pick_room(&scene, Point2::new(44.0, 121.0)), Some("room-7"));
    }

    #[test]
    fn furniture_swallows_clicks() {
        // Inside the sofa at (25, 5) 20x8.
        assert_eq!(pick_room(&scene(), Point2::new(30.0, 8.0)), None);
    }

    #[test]
    fn rotated_furniture_is_hit_in_its_own_frame() {
        // Chair f-11 at (42, 68), 3x4, rotated 90 degrees about its center
        // (43.5, 70): its footprint spans x 41.5..45.5, y 68.5..71.5.
        let scene = scene();
        assert_eq!(pick_room(&scene, Point2::new(41.7, 70.0)), None);
        assert_eq!(pick_room(&scene, Point2::new(42.5, 68.2)), Some("room-3"));
    }

    #[test]
    fn stair_treads_do_not_capture() {
        assert_eq!(pick_room(&scene(), Point2::new(50.0, 50.0)), Some("room-3"));
    }

    #[test]
    fn outside_canvas_misses() {
        assert_eq!(pick_room(&scene(), Point2::new(-10.0, -10.0)), None);
    }
}
