//! Scene to SVG markup.
//!
//! The output is the single vector form every consumer shares: the
//! interactive view embeds it as is, and rasterization feeds it to `usvg`.

use std::fmt::Write;

use crate::math::{Point2, TransformOp};

use super::compose::{ROOM_FILL_OPACITY, SELECTED_PALETTE};
use super::node::{Group, Label, Layer, Node, Primitive, RoomShape, Scene, Shape, Style};

/// Pixel size used when the scene frame is empty.
pub const FALLBACK_SIZE: (f64, f64) = (1024.0, 768.0);

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const GRID_STROKE: &str = "#6b7280";
const GRID_OPACITY: f64 = 0.2;
const GRID_LINE: f64 = 0.5;

/// Serializes a scene to a standalone SVG document.
///
/// The root `width`/`height` equal the scene frame in plan units and the
/// `viewBox` maps the frame one to one, so a rasterizer scaling the
/// document by `k` yields `k` pixels per plan unit.
#[must_use]
pub fn to_svg(scene: &Scene) -> String {
    let vb = scene.view_box;
    let mut out = String::with_capacity(16 * 1024);

    if vb.width() > 0.0 && vb.height() > 0.0 {
        let _ = write!(
            out,
            r#"<svg xmlns="{SVG_NS}" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            num(vb.width()),
            num(vb.height()),
            num(vb.min_x),
            num(vb.min_y),
            num(vb.width()),
            num(vb.height()),
        );
    } else {
        let _ = write!(
            out,
            r#"<svg xmlns="{SVG_NS}" width="{}" height="{}">"#,
            num(FALLBACK_SIZE.0),
            num(FALLBACK_SIZE.1),
        );
    }

    let grid = scene
        .nodes
        .iter()
        .flat_map(Node::descendants)
        .find_map(|n| match n {
            Node::Grid { spacing } => Some(*spacing),
            _ => None,
        });
    if let Some(spacing) = grid {
        let _ = write!(
            out,
            r#"<defs><pattern id="grid" width="{s}" height="{s}" patternUnits="userSpaceOnUse"><path d="M {s} 0 L 0 0 0 {s}" fill="none" stroke="{GRID_STROKE}" stroke-opacity="{}" stroke-width="{}"/></pattern></defs>"#,
            num(GRID_OPACITY),
            num(GRID_LINE),
            s = num(spacing),
        );
    }

    let _ = write!(
        out,
        r#"<rect class="paper" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        num(vb.min_x),
        num(vb.min_y),
        num(vb.width()),
        num(vb.height()),
        scene.paper.hex(),
    );

    for node in &scene.nodes {
        write_node(&mut out, scene, node);
    }
    out.push_str("</svg>");
    out
}

fn write_node(out: &mut String, scene: &Scene, node: &Node) {
    match node {
        Node::Group(g) => write_group(out, scene, g),
        Node::Room(room) => write_room(out, room),
        Node::Primitive(p) => write_primitive(out, scene, p),
        Node::Label(label) => write_label(out, scene, label),
        Node::Grid { .. } => {
            let vb = scene.view_box;
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="url(#grid)"/>"#,
                num(vb.min_x),
                num(vb.min_y),
                num(vb.width()),
                num(vb.height()),
            );
        }
    }
}

fn write_group(out: &mut String, scene: &Scene, group: &Group) {
    out.push_str("<g");
    match &group.layer {
        Layer::Background => out.push_str(r#" class="background""#),
        Layer::Room { id } => {
            let _ = write!(out, r#" class="room" data-room-id="{}""#, escape(id));
        }
        Layer::Furniture { id, .. } => {
            let _ = write!(
                out,
                r#" class="furniture-symbol-group" data-furniture-id="{}""#,
                escape(id)
            );
        }
        Layer::Stairs { room_id } => {
            let _ = write!(out, r#" class="stairs" data-room-id="{}""#, escape(room_id));
        }
        Layer::Openings => out.push_str(r#" class="openings""#),
        Layer::Opening { kind, room_id } => {
            let _ = write!(out, r#" class="{kind}" data-room-id="{}""#, escape(room_id));
        }
    }
    if !group.transform.is_identity() {
        out.push_str(r#" transform=""#);
        for (i, op) in group.transform.ops().iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match op {
                TransformOp::Translate(v) => {
                    let _ = write!(out, "translate({} {})", num(v.x), num(v.y));
                }
                TransformOp::Rotate { degrees, pivot } => {
                    let _ = write!(
                        out,
                        "rotate({} {} {})",
                        num(*degrees),
                        num(pivot.x),
                        num(pivot.y)
                    );
                }
            }
        }
        out.push('"');
    }
    out.push('>');
    for child in &group.children {
        write_node(out, scene, child);
    }
    out.push_str("</g>");
}

fn write_room(out: &mut String, room: &RoomShape) {
    let (palette, width, class) = if room.selected {
        (SELECTED_PALETTE, room.stroke_width * 2.0, "room-shape selected")
    } else {
        (room.palette, room.stroke_width, "room-shape")
    };
    // Two vertices still show the wall they span.
    let tag = if room.ring.len() == 2 {
        "polyline"
    } else {
        "polygon"
    };
    let _ = write!(
        out,
        r#"<{tag} class="{class}" points="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}" stroke-linejoin="miter"/>"#,
        points(&room.ring),
        palette.fill.hex(),
        num(ROOM_FILL_OPACITY),
        palette.stroke.hex(),
        num(width),
    );
}

fn write_label(out: &mut String, scene: &Scene, label: &Label) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" font-weight="{}" text-anchor="middle" dominant-baseline="middle" fill="{}">{}</text>"#,
        num(label.anchor.x),
        num(label.anchor.y),
        num(label.size),
        if label.bold { "bold" } else { "normal" },
        scene.ink().hex(),
        escape(&label.text),
    );
}

fn write_primitive(out: &mut String, scene: &Scene, p: &Primitive) {
    match &p.shape {
        Shape::Line { from, to } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            );
        }
        Shape::Rect {
            origin,
            width,
            height,
            corner,
        } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                num(origin.x),
                num(origin.y),
                num(*width),
                num(*height)
            );
            if *corner > 0.0 {
                let _ = write!(out, r#" rx="{}""#, num(*corner));
            }
        }
        Shape::Circle { center, radius } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                num(center.x),
                num(center.y),
                num(*radius)
            );
        }
        Shape::Ellipse { center, rx, ry } => {
            let _ = write!(
                out,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                num(center.x),
                num(center.y),
                num(*rx),
                num(*ry)
            );
        }
        Shape::Arc {
            from,
            to,
            radius,
            clockwise,
        } => {
            let _ = write!(
                out,
                r#"<path d="M {} {} A {r} {r} 0 0 {} {} {}""#,
                num(from.x),
                num(from.y),
                u8::from(*clockwise),
                num(to.x),
                num(to.y),
                r = num(*radius),
            );
        }
    }
    write_style(out, scene, &p.style);
    out.push_str("/>");
}

fn write_style(out: &mut String, scene: &Scene, style: &Style) {
    match scene.resolve(style.fill) {
        Some(c) => {
            let _ = write!(out, r#" fill="{}""#, c.hex());
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(c) = scene.resolve(style.stroke) {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            c.hex(),
            num(style.stroke_width)
        );
        if let Some(d) = style.dash {
            let _ = write!(out, r#" stroke-dasharray="{d} {d}""#, d = num(d));
        }
    }
}

fn points(ring: &[Point2]) -> String {
    let mut s = String::new();
    for (i, p) in ring.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        let _ = write!(s, "{},{}", num(p.x), num(p.y));
    }
    s
}

/// Formats a coordinate with at most four decimals and no trailing zeros.
/// Non-finite values are written as `0`.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            c if is_xml_char(c) => s.push(c),
            _ => s.push(char::REPLACEMENT_CHARACTER),
        }
    }
    s
}

/// XML 1.0 `Char` production; surrogates cannot occur in a `char`.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{fffd}' | '\u{10000}'..='\u{10ffff}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FloorPlan;
    use crate::scene::{compose_scene, ViewState};

    #[test]
    fn number_formatting() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(0.25), "0.25");
        assert_eq!(num(-0.00001), "0");
        assert_eq!(num(2.0 / 3.0), "0.6667");
        assert_eq!(num(f64::NAN), "0");
        assert_eq!(num(-20.0), "-20");
    }

    #[test]
    fn root_frame_matches_padded_canvas() {
        let svg = to_svg(&compose_scene(&FloorPlan::sample(), &ViewState::default()));
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="162" viewBox="-20 -20 100 162">"#
        ));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"fill="url(#grid)""#));
    }

    #[test]
    fn openings_follow_every_room() {
        let svg = to_svg(&compose_scene(&FloorPlan::sample(), &ViewState::default()));
        let last_room = svg.rfind(r#"class="room""#).unwrap_or(0);
        let openings = svg.find(r#"class="openings""#).unwrap_or(0);
        assert!(openings > last_room);
        assert_eq!(svg.matches(r#"class="door""#).count(), 4);
        assert_eq!(svg.matches(r#"class="window""#).count(), 3);
    }

    #[test]
    fn furniture_transform_is_written_outermost_first() {
        let svg = to_svg(&compose_scene(&FloorPlan::sample(), &ViewState::default()));
        assert!(svg.contains(
            r#"data-furniture-id="f-11" transform="translate(42 68) rotate(90 1.5 2)""#
        ));
    }

    #[test]
    fn labels_are_escaped() {
        let mut plan = FloorPlan::sample();
        plan.rooms[0].name = "Den & <Study>".into();
        let svg = to_svg(&compose_scene(&plan, &ViewState::default()));
        assert!(svg.contains(">Den &amp; &lt;Study&gt;</text>"));
    }

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(escape("Den\u{1}"), "Den\u{fffd}");
        assert_eq!(escape("a\tb\u{7}\u{fffe}"), "a\tb\u{fffd}\u{fffd}");
        assert_eq!(escape("\u{1f6bd}"), "\u{1f6bd}");
    }

    #[test]
    fn selected_room_uses_accent_and_double_stroke() {
        let view = ViewState {
            selected_room_id: Some("room-7".into()),
            show_background: true,
        };
        let svg = to_svg(&compose_scene(&FloorPlan::sample(), &view));
        assert_eq!(svg.matches("room-shape selected").count(), 1);
        assert!(svg.contains(&format!(
            r#"stroke="{}" stroke-width="1.6""#,
            SELECTED_PALETTE.stroke.hex()
        )));
        assert!(svg.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn empty_frame_falls_back_to_default_size() {
        let mut plan = FloorPlan::sample();
        plan.total_width = -100.0;
        plan.total_height = -100.0;
        let mut scene = compose_scene(&plan, &ViewState::default());
        scene.view_box = crate::math::Bounds::default();
        let svg = to_svg(&scene);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1024" height="768">"#));
    }
}
