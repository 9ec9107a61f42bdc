use crate::math::{Bounds, Point2, Transform};
use crate::model::OpeningKind;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance in `[0, 1]` (Rec. 709 weights, no gamma).
    #[must_use]
    pub fn luminance(&self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }
}

/// How a fill or stroke is painted.
///
/// `Paper` and `Ink` resolve against the scene's paper color at
/// serialization time, so one scene can be re-papered for export without
/// touching its geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    None,
    /// The canvas color. Used to erase wall spans under openings.
    Paper,
    /// A color contrasting with the paper.
    Ink,
}

/// Fill/stroke attributes of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Paint,
    pub stroke: Paint,
    pub stroke_width: f64,
    /// Dash length; gaps are the same length.
    pub dash: Option<f64>,
}

impl Style {
    /// Unfilled ink outline.
    #[must_use]
    pub const fn outline(width: f64) -> Self {
        Self {
            fill: Paint::None,
            stroke: Paint::Ink,
            stroke_width: width,
            dash: None,
        }
    }

    /// Unstroked fill.
    #[must_use]
    pub const fn fill(paint: Paint) -> Self {
        Self {
            fill: paint,
            stroke: Paint::None,
            stroke_width: 0.0,
            dash: None,
        }
    }

    #[must_use]
    pub const fn dashed(mut self, dash: f64) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// Geometry of a primitive, in its parent group's frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Point2,
        to: Point2,
    },
    Rect {
        origin: Point2,
        width: f64,
        height: f64,
        corner: f64,
    },
    Circle {
        center: Point2,
        radius: f64,
    },
    Ellipse {
        center: Point2,
        rx: f64,
        ry: f64,
    },
    /// Circular arc from `from` to `to`, the short way round.
    Arc {
        from: Point2,
        to: Point2,
        radius: f64,
        clockwise: bool,
    },
}

/// A styled shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub style: Style,
}

impl Primitive {
    #[must_use]
    pub fn new(shape: Shape, style: Style) -> Self {
        Self { shape, style }
    }
}

/// Fill and stroke colors of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomPalette {
    pub fill: Color,
    pub stroke: Color,
}

/// A room's wall polygon. Highlighting is resolved at serialization time.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomShape {
    pub id: String,
    pub ring: Vec<Point2>,
    pub palette: RoomPalette,
    pub stroke_width: f64,
    pub selected: bool,
}

/// A centered text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Point2,
    pub size: f64,
    pub bold: bool,
}

/// What a group holds. Export and hit testing select on this.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Grid backdrop; interactive view only.
    Background,
    Room { id: String },
    Furniture { id: String, width: f64, height: f64 },
    Stairs { room_id: String },
    /// Container for every opening in the plan.
    Openings,
    Opening { kind: OpeningKind, room_id: String },
}

/// A transformed collection of child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub layer: Layer,
    pub transform: Transform,
    pub children: Vec<Node>,
}

/// A node of the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Room(RoomShape),
    Primitive(Primitive),
    Label(Label),
    /// Square grid covering the whole view box.
    Grid { spacing: f64 },
}

/// An immutable, fully composed floor-plan drawing.
///
/// Produced fresh for every render; never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Plan canvas plus padding; the scene's coordinate frame.
    pub view_box: Bounds,
    pub paper: Color,
    pub nodes: Vec<Node>,
}

impl Scene {
    /// Color used for [`Paint::Ink`].
    #[must_use]
    pub fn ink(&self) -> Color {
        if self.paper.luminance() < 0.5 {
            Color::rgb(0xe5, 0xe7, 0xeb)
        } else {
            Color::rgb(0x11, 0x18, 0x27)
        }
    }

    /// Resolves a paint against this scene's paper.
    #[must_use]
    pub fn resolve(&self, paint: Paint) -> Option<Color> {
        match paint {
            Paint::None => None,
            Paint::Paper => Some(self.paper),
            Paint::Ink => Some(self.ink()),
        }
    }

    /// Returns every group whose layer matches `pred`, in paint order.
    pub fn groups<'a>(
        &'a self,
        mut pred: impl FnMut(&Layer) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Group> + 'a {
        self.nodes.iter().flat_map(Node::descendants).filter_map(move |n| match n {
            Node::Group(g) if pred(&g.layer) => Some(g),
            _ => None,
        })
    }
}

impl Node {
    /// Depth-first, paint-order iteration over this node and its subtree.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        if let Node::Group(g) = self {
            for child in &g.children {
                out.extend(child.descendants());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ink_contrasts_with_paper() {
        let mut scene = Scene {
            view_box: Bounds::default(),
            paper: Color::rgb(0x1f, 0x29, 0x37),
            nodes: Vec::new(),
        };
        assert!(scene.ink().luminance() > 0.5);
        scene.paper = Color::WHITE;
        assert!(scene.ink().luminance() < 0.5);
        assert_eq!(scene.resolve(Paint::Paper), Some(Color::WHITE));
        assert_eq!(scene.resolve(Paint::None), None);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Color::rgb(0x1e, 0x3a, 0x8a).hex(), "#1e3a8a");
    }
}
