use crate::math::Point2;
use crate::model::{transform_for, Furniture, FurnitureKind, Point};
use crate::scene::{Group, Layer, Node, Primitive, Shape, Style};

use super::{finite_or_zero, sanitize_extent, SYMBOL_STROKE};

/// Builds a symbol in the local frame `(0, 0)-(width, height)`.
pub type Recipe = fn(f64, f64) -> Vec<Primitive>;

/// Returns the drawing recipe for a furniture kind.
///
/// Unknown kinds get [`fallback`]; this never fails.
#[must_use]
pub fn recipe_for(kind: &FurnitureKind) -> Recipe {
    match kind {
        FurnitureKind::Sofa => sofa,
        FurnitureKind::Armchair => armchair,
        FurnitureKind::Bed => bed,
        FurnitureKind::DiningTable => dining_table,
        FurnitureKind::Chair => chair,
        FurnitureKind::KitchenCounter => kitchen_counter,
        FurnitureKind::Sink => sink,
        FurnitureKind::Stove => stove,
        FurnitureKind::Toilet => toilet,
        FurnitureKind::Bathtub => bathtub,
        FurnitureKind::Shower => shower,
        FurnitureKind::Wardrobe => wardrobe,
        FurnitureKind::Plant => plant,
        FurnitureKind::Desk => desk,
        FurnitureKind::TvStand => tv_stand,
        FurnitureKind::Fridge => fridge,
        FurnitureKind::WashingMachine => washing_machine,
        FurnitureKind::Rug => rug,
        FurnitureKind::Other(_) => fallback,
    }
}

/// Builds the placed symbol group for one furniture piece.
///
/// Non-finite or negative dimensions collapse to zero and non-finite
/// placement to the origin, so a bad piece still yields a drawable group.
#[must_use]
pub fn furniture_symbol(piece: &Furniture) -> Group {
    let width = sanitize_extent(piece.width);
    let height = sanitize_extent(piece.height);
    let placed = Furniture {
        position: Point::new(
            finite_or_zero(piece.position.x),
            finite_or_zero(piece.position.y),
        ),
        width,
        height,
        rotation: finite_or_zero(piece.rotation),
        ..piece.clone()
    };
    let recipe = recipe_for(&piece.kind);
    Group {
        layer: Layer::Furniture {
            id: piece.id.clone(),
            width,
            height,
        },
        transform: transform_for(&placed),
        children: recipe(width, height)
            .into_iter()
            .map(Node::Primitive)
            .collect(),
    }
}

fn pen() -> Style {
    Style::outline(SYMBOL_STROKE)
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Primitive {
    rounded(x, y, w, h, 0.0)
}

fn rounded(x: f64, y: f64, w: f64, h: f64, corner: f64) -> Primitive {
    Primitive::new(
        Shape::Rect {
            origin: Point2::new(x, y),
            width: w,
            height: h,
            corner,
        },
        pen(),
    )
}

fn inset(w: f64, h: f64, fraction: f64) -> Primitive {
    let d = w.min(h) * fraction;
    rect(d, d, w - 2.0 * d, h - 2.0 * d)
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Primitive {
    Primitive::new(
        Shape::Line {
            from: Point2::new(x0, y0),
            to: Point2::new(x1, y1),
        },
        pen(),
    )
}

fn circle(cx: f64, cy: f64, radius: f64) -> Primitive {
    Primitive::new(
        Shape::Circle {
            center: Point2::new(cx, cy),
            radius,
        },
        pen(),
    )
}

fn sofa(w: f64, h: f64) -> Vec<Primitive> {
    vec![
        rounded(0.0, 0.0, w, h, w.min(h) * 0.1),
        rect(0.0, 0.0, w, h * 0.25),
        rect(0.0, 0.0, w * 0.12, h),
        rect(w * 0.88, 0.0, w * 0.12, h),
        line(w * 0.5, h * 0.25, w * 0.5, h),
    ]
}

fn armchair(w: f64, h: f64) -> Vec<Primitive> {
    vec![
        rounded(0.0, 0.0, w, h, w.min(h) * 0.1),
        rect(0.0, 0.0, w, h * 0.25),
        rect(0.0, 0.0, w * 0.15, h),
        rect(w * 0.85, 0.0, w * 0.15, h),
    ]
}

fn bed(w: f64, h: f64) -> Vec<Primitive> {
    let r = w.min(h) * 0.03;
    vec![
        rect(0.0, 0.0, w, h),
        rounded(w * 0.08, h * 0.05, w * 0.38, h * 0.15, r),
        rounded(w * 0.54, h * 0.05, w * 0.38, h * 0.15, r),
        line(0.0, h * 0.3, w, h * 0.3),
    ]
}

fn dining_table(w: f64, h: f64) -> Vec<Primitive> {
    vec![rounded(0.0, 0.0, w, h, w.min(h) * 0.1), inset(w, h, 0.1)]
}

fn chair(w: f64, h: f64) -> Vec<Primitive> {
    vec![
        rounded(0.0, 0.0, w, h, w.min(h) * 0.15),
        rect(0.0, 0.0, w, h * 0.2),
    ]
}

fn kitchen_counter(w: f64, h: f64) -> Vec<Primitive> {
    vec![rect(0.0, 0.0, w, h), inset(w, h, 0.15)]
}

fn sink(w: f64, h: f64) -> Vec<Primitive> {
    let r = w / 3.0;
    vec![
        rect(0.0, 0.0, w, h),
        circle(w * 0.5, h * 0.5, r),
        circle(w * 0.5, h * 0.5, r * 0.15),
    ]
}

fn stove(w: f64, h: f64) -> Vec<Primitive> {
    let r = w.min(h) * 0.15;
    let mut parts = vec![rect(0.0, 0.0, w, h)];
    for (fx, fy) in [(0.3, 0.3), (0.7, 0.3), (0.3, 0.7), (0.7, 0.7)] {
        parts.push(circle(w * fx, h * fy, r));
    }
    parts
}

fn toilet(w: f64, h: f64) -> Vec<Primitive> {
    vec![
        rect(0.0, 0.0, w, h),
        rect(0.0, 0.0, w, h * 0.3),
        Primitive::new(
            Shape::Ellipse {
                center: Point2::new(w * 0.5, h * 0.65),
                rx: w * 0.4,
                ry: h * 0.3,
            },
            pen(),
        ),
    ]
}

fn bathtub(w: f64, h: f64) -> Vec<Primitive> {
    let m = w.min(h);
    let d = m * 0.1;
    vec![
        rounded(0.0, 0.0, w, h, m * 0.1),
        rounded(d, d, w - 2.0 * d, h - 2.0 * d, m * 0.3),
        circle(w * 0.15, h * 0.5, m * 0.06),
    ]
}

fn shower(w: f64, h: f64) -> Vec<Primitive> {
    let mut tray = inset(w, h, 0.08);
    tray.style = tray.style.dashed(SYMBOL_STROKE * 3.0);
    vec![
        rect(0.0, 0.0, w, h),
        tray,
        circle(w * 0.5, h * 0.5, w.min(h) * 0.08),
    ]
}

fn wardrobe(w: f64, h: f64) -> Vec<Primitive> {
    let mut rail = line(0.0, h * 0.5, w, h * 0.5);
    rail.style = rail.style.dashed(SYMBOL_STROKE * 3.0);
    vec![rect(0.0, 0.0, w, h), rail, line(w * 0.5, 0.0, w * 0.5, h)]
}

fn plant(w: f64, h: f64) -> Vec<Primitive> {
    let (cx, cy) = (w * 0.5, h * 0.5);
    let outer = w.min(h) * 0.5;
    let inner = outer * 0.5;
    let mut parts = vec![circle(cx, cy, outer), circle(cx, cy, inner)];
    for deg in [45.0_f64, 135.0, 225.0, 315.0] {
        let (s, c) = deg.to_radians().sin_cos();
        parts.push(line(
            cx + inner * c,
            cy + inner * s,
            cx + outer * c,
            cy + outer * s,
        ));
    }
    parts
}

fn desk(w: f64, h: f64) -> Vec<Primitive> {
    vec![
        rect(0.0, 0.0, w, h),
        rect(w * 0.3, h * 0.1, w * 0.4, h * 0.12),
    ]
}

fn tv_stand(w: f64, h: f64) -> Vec<Primitive> {
    vec![rect(0.0, 0.0, w, h), line(w * 0.1, h * 0.3, w * 0.9, h * 0.3)]
}

fn fridge(w: f64, h: f64) -> Vec<Primitive> {
    vec![
        rect(0.0, 0.0, w, h),
        line(0.0, h * 0.3, w, h * 0.3),
        line(w * 0.85, h * 0.08, w * 0.85, h * 0.22),
    ]
}

fn washing_machine(w: f64, h: f64) -> Vec<Primitive> {
    let m = w.min(h);
    vec![
        rect(0.0, 0.0, w, h),
        circle(w * 0.5, h * 0.5, m * 0.35),
        circle(w * 0.5, h * 0.5, m * 0.2),
    ]
}

fn rug(w: f64, h: f64) -> Vec<Primitive> {
    let mut border = rect(0.0, 0.0, w, h);
    border.style = border.style.dashed(SYMBOL_STROKE * 4.0);
    vec![border, inset(w, h, 0.1)]
}

/// Outline with a diagonal cross, for kinds with no recipe.
#[must_use]
pub fn fallback(w: f64, h: f64) -> Vec<Primitive> {
    vec![rect(0.0, 0.0, w, h), line(0.0, 0.0, w, h), line(w, 0.0, 0.0, h)]
}
