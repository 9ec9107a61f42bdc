pub mod bounds;
pub mod polygon_2d;
pub mod transform;

pub use bounds::{compute_bounds, Axis, Bounds};
pub use transform::{Transform, TransformOp};

/// 2D point type in plan-space units.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous transformation matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;
