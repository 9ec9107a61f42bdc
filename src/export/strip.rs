use crate::scene::{Color, Group, Layer, Node, Scene};

/// Derives the print form of an interactive scene.
///
/// The grid is dropped, the paper turns white (so ink turns dark and
/// opening erase blocks turn white), selection highlighting is cleared and
/// furniture is optionally removed. Geometry and paint order are kept.
#[must_use]
pub fn strip_for_export(scene: &Scene, include_furniture: bool) -> Scene {
    Scene {
        view_box: scene.view_box,
        paper: Color::WHITE,
        nodes: strip_nodes(&scene.nodes, include_furniture),
    }
}

fn strip_nodes(nodes: &[Node], include_furniture: bool) -> Vec<Node> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Grid { .. } => None,
            Node::Group(g) => match g.layer {
                Layer::Background => None,
                Layer::Furniture { .. } if !include_furniture => None,
                _ => Some(Node::Group(Group {
                    layer: g.layer.clone(),
                    transform: g.transform.clone(),
                    children: strip_nodes(&g.children, include_furniture),
                })),
            },
            Node::Room(shape) => {
                let mut shape = shape.clone();
                shape.selected = false;
                Some(Node::Room(shape))
            }
            Node::Label(label) => {
                let mut label = label.clone();
                label.bold = false;
                Some(Node::Label(label))
            }
            other @ Node::Primitive(_) => Some(other.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FloorPlan;
    use crate::scene::{compose_scene, ViewState};

    #[test]
    fn drops_background_and_selection() {
        let plan = FloorPlan::sample();
        let scene = compose_scene(
            &plan,
            &ViewState {
                selected_room_id: Some("room-1".into()),
                show_background: true,
            },
        );
        let print = strip_for_export(&scene, true);
        assert_eq!(print.paper, Color::WHITE);
        assert_eq!(print.view_box, scene.view_box);
        assert_eq!(print.groups(|l| *l == Layer::Background).count(), 0);
        assert!(print
            .nodes
            .iter()
            .flat_map(Node::descendants)
            .all(|n| !matches!(n, Node::Room(r) if r.selected)));
        // Same as composing without selection or grid.
        let plain = compose_scene(
            &plan,
            &ViewState {
                selected_room_id: None,
                show_background: false,
            },
        );
        assert_eq!(print, plain);
    }

    #[test]
    fn furniture_is_optional() {
        let scene = compose_scene(&FloorPlan::sample(), &ViewState::default());
        let bare = strip_for_export(&scene, false);
        assert_eq!(
            bare.groups(|l| matches!(l, Layer::Furniture { .. })).count(),
            0
        );
        assert_eq!(
            bare.groups(|l| matches!(l, Layer::Opening { .. })).count(),
            7
        );
        assert_eq!(
            strip_for_export(&scene, true)
                .groups(|l| matches!(l, Layer::Furniture { .. }))
                .count(),
            19
        );
    }
}
