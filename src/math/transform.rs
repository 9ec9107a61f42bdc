use nalgebra::Rotation2;

use super::{Matrix3, Point2, Vector2};

/// A single step of a [`Transform`], kept symbolic so it can be written
/// back out as vector markup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(Vector2),
    /// Clockwise rotation (y axis pointing down) about `pivot`.
    Rotate { degrees: f64, pivot: Point2 },
}

impl TransformOp {
    /// Returns the homogeneous matrix of this step.
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        match *self {
            Self::Translate(v) => Matrix3::new_translation(&v),
            Self::Rotate { degrees, pivot } => {
                let to_pivot = Matrix3::new_translation(&pivot.coords);
                let rot = Rotation2::new(degrees.to_radians()).to_homogeneous();
                let from_pivot = Matrix3::new_translation(&(-pivot.coords));
                to_pivot * rot * from_pivot
            }
        }
    }
}

/// An ordered chain of translations and rotations.
///
/// Ops compose the way nested vector-markup transforms do: the first op is
/// the outermost, so a point is run through the last op first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform {
    ops: Vec<TransformOp>,
}

impl Transform {
    /// Creates the identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Appends a translation.
    #[must_use]
    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        self.ops.push(TransformOp::Translate(Vector2::new(dx, dy)));
        self
    }

    /// Appends a clockwise rotation in degrees about `pivot`.
    #[must_use]
    pub fn rotate_about(mut self, degrees: f64, pivot: Point2) -> Self {
        self.ops.push(TransformOp::Rotate { degrees, pivot });
        self
    }

    /// Returns the ops in application-outermost-first order.
    #[must_use]
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the combined homogeneous matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        self.ops
            .iter()
            .fold(Matrix3::identity(), |acc, op| acc * op.matrix())
    }

    /// Maps a point from the local frame into the parent frame.
    #[must_use]
    pub fn apply(&self, p: &Point2) -> Point2 {
        self.matrix().transform_point(p)
    }

    /// Maps a point from the parent frame back into the local frame.
    ///
    /// Returns `None` if the transform is singular, which rotations and
    /// translations never are.
    #[must_use]
    pub fn apply_inverse(&self, p: &Point2) -> Option<Point2> {
        self.matrix().try_inverse().map(|inv| inv.transform_point(p))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn translate_then_rotate_keeps_pivot_fixed() {
        let t = Transform::identity()
            .translate(10.0, 5.0)
            .rotate_about(90.0, Point2::new(2.0, 1.0));
        let pivot = t.apply(&Point2::new(2.0, 1.0));
        assert_relative_eq!(pivot.x, 12.0, epsilon = 1e-9);
        assert_relative_eq!(pivot.y, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn positive_rotation_is_clockwise_on_screen() {
        // +x rotated 90 degrees lands on +y, which points down.
        let t = Transform::identity().rotate_about(90.0, Point2::origin());
        let p = t.apply(&Point2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn inverse_round_trips() {
        let t = Transform::identity()
            .translate(-3.0, 7.5)
            .rotate_about(-37.0, Point2::new(4.0, 2.0));
        let p = Point2::new(1.25, -8.0);
        let back = t.apply_inverse(&t.apply(&p)).unwrap();
        assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
    }

    #[test]
    fn identity_is_empty() {
        let t = Transform::identity();
        assert!(t.is_identity());
        let p = t.apply(&Point2::new(4.0, 4.0));
        assert_relative_eq!(p.x, 4.0);
    }
}
