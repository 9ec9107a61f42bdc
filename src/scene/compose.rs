use tracing::debug;

use crate::math::{Bounds, Transform};
use crate::model::{auto_font_size, FloorPlan, Room, RoomType};
use crate::symbols::{furniture_symbol, opening_symbol, stair_treads};

use super::node::{Color, Group, Label, Layer, Node, RoomPalette, RoomShape, Scene};

/// Margin around the plan canvas, in plan units.
pub const PADDING: f64 = 20.0;

/// Background grid pitch, in plan units.
pub const GRID_SPACING: f64 = 10.0;

/// Paper color of the interactive view.
pub const BACKDROP: Color = Color::rgb(0x1f, 0x29, 0x37);

/// Palette applied to the selected room.
pub const SELECTED_PALETTE: RoomPalette = RoomPalette {
    fill: Color::rgb(0x78, 0x35, 0x0f),
    stroke: Color::rgb(0xfb, 0xbf, 0x24),
};

/// Fill opacity of room polygons.
pub const ROOM_FILL_OPACITY: f64 = 0.5;

/// Interaction state that affects composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected_room_id: Option<String>,
    pub show_background: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_room_id: None,
            show_background: true,
        }
    }
}

/// Returns the fill/stroke palette for a room type.
#[must_use]
pub fn palette_for(room_type: &RoomType) -> RoomPalette {
    let (fill, stroke) = match room_type {
        RoomType::Bedroom => ((0x1e, 0x3a, 0x8a), (0x60, 0xa5, 0xfa)),
        RoomType::Bathroom => ((0x58, 0x1c, 0x87), (0xc0, 0x84, 0xfc)),
        RoomType::Kitchen => ((0x14, 0x53, 0x2d), (0x4a, 0xde, 0x80)),
        RoomType::LivingRoom => ((0x71, 0x3f, 0x12), (0xfa, 0xcc, 0x15)),
        RoomType::DiningRoom => ((0x7c, 0x2d, 0x12), (0xfb, 0x92, 0x3c)),
        RoomType::Closet => ((0x37, 0x41, 0x51), (0x9c, 0xa3, 0xaf)),
        _ => ((0x1f, 0x29, 0x37), (0x6b, 0x72, 0x80)),
    };
    RoomPalette {
        fill: Color::rgb(fill.0, fill.1, fill.2),
        stroke: Color::rgb(stroke.0, stroke.1, stroke.2),
    }
}

/// Returns the scene frame: the plan canvas grown by [`PADDING`].
///
/// Non-finite or negative canvas dimensions are treated as zero.
#[must_use]
pub fn scene_bounds(plan: &FloorPlan) -> Bounds {
    let clamp = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Bounds::from_origin_size(0.0, 0.0, clamp(plan.total_width), clamp(plan.total_height))
        .expanded(PADDING)
}

/// Composes the complete scene for one plan snapshot.
///
/// Paint order is fixed: background grid, then per room its polygon and
/// label, its furniture and its stair treads, and finally every door and
/// window of every room, so openings cut through walls drawn by any room.
#[must_use]
pub fn compose_scene(plan: &FloorPlan, view: &ViewState) -> Scene {
    let wall = plan.effective_wall_thickness();
    let mut nodes = Vec::with_capacity(plan.rooms.len() * 3 + 2);

    if view.show_background {
        nodes.push(Node::Group(Group {
            layer: Layer::Background,
            transform: Transform::identity(),
            children: vec![Node::Grid {
                spacing: GRID_SPACING,
            }],
        }));
    }

    for room in &plan.rooms {
        let selected = view.selected_room_id.as_deref() == Some(room.id.as_str());
        nodes.push(Node::Group(room_group(room, wall, selected)));
        nodes.extend(
            room.furniture
                .iter()
                .map(|piece| Node::Group(furniture_symbol(piece))),
        );
        if let Some(treads) = stair_treads(room) {
            nodes.push(Node::Group(treads));
        }
    }

    let openings = plan
        .rooms
        .iter()
        .flat_map(|room| {
            room.openings()
                .map(move |(kind, o)| Node::Group(opening_symbol(kind, o, &room.id, wall)))
        })
        .collect::<Vec<_>>();
    debug!(
        rooms = plan.rooms.len(),
        openings = openings.len(),
        "scene composed"
    );
    nodes.push(Node::Group(Group {
        layer: Layer::Openings,
        transform: Transform::identity(),
        children: openings,
    }));

    Scene {
        view_box: scene_bounds(plan),
        paper: if view.show_background {
            BACKDROP
        } else {
            Color::WHITE
        },
        nodes,
    }
}

fn room_group(room: &Room, wall: f64, selected: bool) -> Group {
    Group {
        layer: Layer::Room {
            id: room.id.clone(),
        },
        transform: Transform::identity(),
        children: vec![
            Node::Room(RoomShape {
                id: room.id.clone(),
                ring: room.ring(),
                palette: palette_for(&room.room_type),
                stroke_width: wall,
                selected,
            }),
            Node::Label(Label {
                text: room.name.clone(),
                anchor: room.label_position.into(),
                size: auto_font_size(&room.polygon),
                bold: selected,
            }),
        ],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::model::{OpeningKind, Point};

    fn layers(scene: &Scene) -> Vec<&Layer> {
        scene
            .nodes
            .iter()
            .map(|n| match n {
                Node::Group(g) => &g.layer,
                other => panic!("top-level node is not a group: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn bounds_are_padded_canvas() {
        let scene = compose_scene(&FloorPlan::sample(), &ViewState::default());
        assert_relative_eq!(scene.view_box.min_x, -20.0);
        assert_relative_eq!(scene.view_box.min_y, -20.0);
        assert_relative_eq!(scene.view_box.width(), 100.0);
        assert_relative_eq!(scene.view_box.height(), 162.0);
    }

    #[test]
    fn paint_order_is_background_rooms_then_openings() {
        let plan = FloorPlan::sample();
        let scene = compose_scene(&plan, &ViewState::default());
        let layers = layers(&scene);
        assert_eq!(layers[0], &Layer::Background);
        assert_eq!(layers.last().copied(), Some(&Layer::Openings));
        let stairs = layers
            .iter()
            .position(|l| matches!(l, Layer::Stairs { .. }))
            .unwrap();
        let kitchen_furniture = layers
            .iter()
            .position(|l| matches!(l, Layer::Furniture { id, .. } if id == "f-9"))
            .unwrap();
        let stair_room = layers
            .iter()
            .position(|l| matches!(l, Layer::Room { id } if id == "room-3"))
            .unwrap();
        assert!(kitchen_furniture < stair_room);
        // Stair room: polygon, its three pieces, then the treads.
        assert_eq!(stairs, stair_room + 4);
    }

    #[test]
    fn every_opening_lands_in_final_group() {
        let plan = FloorPlan::sample();
        let scene = compose_scene(&plan, &ViewState::default());
        let Some(Node::Group(openings)) = scene.nodes.last() else {
            panic!("missing openings group");
        };
        let doors = openings
            .children
            .iter()
            .filter(|n| matches!(n, Node::Group(g) if matches!(g.layer, Layer::Opening { kind: OpeningKind::Door, .. })))
            .count();
        assert_eq!(doors, 4);
        assert_eq!(openings.children.len(), 7);
    }

    #[test]
    fn selection_touches_only_the_room_polygon() {
        let plan = FloorPlan::sample();
        let plain = compose_scene(&plan, &ViewState::default());
        let picked = compose_scene(
            &plan,
            &ViewState {
                selected_room_id: Some("room-2".into()),
                show_background: true,
            },
        );
        let mut diffs = Vec::new();
        for (a, b) in plain.nodes.iter().zip(&picked.nodes) {
            if a != b {
                diffs.push(b);
            }
        }
        assert_eq!(diffs.len(), 1);
        let Node::Group(g) = diffs[0] else { panic!() };
        assert_eq!(g.layer, Layer::Room { id: "room-2".into() });
        let Node::Room(shape) = &g.children[0] else { panic!() };
        assert!(shape.selected);
    }

    #[test]
    fn background_toggle_controls_grid_and_paper() {
        let plan = FloorPlan::sample();
        let view = ViewState {
            selected_room_id: None,
            show_background: false,
        };
        let scene = compose_scene(&plan, &view);
        assert!(!layers(&scene).contains(&&Layer::Background));
        assert_eq!(scene.paper, Color::WHITE);
    }

    #[test]
    fn mismatched_door_renders_at_literal_segment() {
        let plan = FloorPlan::sample();
        let scene = compose_scene(&plan, &ViewState::default());
        let door = scene
            .groups(|l| matches!(l, Layer::Opening { room_id, kind: OpeningKind::Door } if room_id == "room-1"))
            .next()
            .unwrap();
        let mid = door.transform.apply(&crate::math::Point2::origin());
        assert_relative_eq!(mid.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(mid.y, 62.0, epsilon = 1e-9);
        assert_eq!(door.children.len(), 3);
    }

    #[test]
    fn degenerate_room_still_composes() {
        let mut plan = FloorPlan::sample();
        plan.rooms[0].polygon = vec![Point::new(1.0, 1.0)];
        plan.rooms[0].furniture[0].width = f64::NAN;
        plan.total_width = f64::NAN;
        let scene = compose_scene(&plan, &ViewState::default());
        assert_relative_eq!(scene.view_box.width(), 40.0);
        assert!(scene.groups(|l| matches!(l, Layer::Room { .. })).count() == 7);
    }

    #[test]
    fn unknown_room_type_uses_default_palette() {
        assert_eq!(
            palette_for(&RoomType::Other("Sauna".into())),
            palette_for(&RoomType::Hallway)
        );
        assert_ne!(
            palette_for(&RoomType::Bedroom),
            palette_for(&RoomType::Kitchen)
        );
    }

    #[test]
    fn composition_is_deterministic() {
        let plan = FloorPlan::sample();
        let view = ViewState::default();
        assert_eq!(compose_scene(&plan, &view), compose_scene(&plan, &view));
    }
}
