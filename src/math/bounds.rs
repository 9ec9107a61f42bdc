use super::{Point2, TOLERANCE};

/// Principal direction of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// An axis-aligned bounding box in plan space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates a box from its origin corner and extent.
    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: x,
            max_x: x + width,
            min_y: y,
            max_y: y + height,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the smaller of width and height.
    #[must_use]
    pub fn min_side(&self) -> f64 {
        self.width().min(self.height())
    }

    /// Returns the longer axis; ties resolve to [`Axis::Vertical`].
    #[must_use]
    pub fn longer_axis(&self) -> Axis {
        if self.width() > self.height() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Grows the box by `margin` on all four sides.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }

    /// Inclusive containment test with [`TOLERANCE`] slack.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min_x - TOLERANCE
            && p.x <= self.max_x + TOLERANCE
            && p.y >= self.min_y - TOLERANCE
            && p.y <= self.max_y + TOLERANCE
    }

    /// Returns `true` if `other` lies entirely inside this box.
    #[must_use]
    pub fn encloses(&self, other: &Bounds) -> bool {
        self.contains(&Point2::new(other.min_x, other.min_y))
            && self.contains(&Point2::new(other.max_x, other.max_y))
    }
}

/// Computes the bounding box of a point set.
///
/// An empty slice yields the degenerate zero-size box at the origin; callers
/// that need a real extent must guard for that case themselves.
#[must_use]
pub fn compute_bounds(points: &[Point2]) -> Bounds {
    let Some(first) = points.first() else {
        return Bounds::default();
    };
    points.iter().skip(1).fold(
        Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        },
        |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        },
    )
}
