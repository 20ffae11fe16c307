mod aabb;

pub use aabb::Aabb;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Rigid motion (rotation followed by translation).
pub type Isometry3 = nalgebra::Isometry3<f64>;

/// Unit quaternion used for rotations.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for zero-length checks.
pub const TOLERANCE: f64 = 1e-10;

/// Distance below which two coordinates are treated as the same, in model
/// units (millimetres).
pub const LINEAR_TOLERANCE: f64 = 1e-6;

/// Tolerance when deciding whether a rotation maps axes onto axes.
pub const ANGULAR_TOLERANCE: f64 = 1e-9;

/// Returns `true` if `a` and `b` differ by less than [`LINEAR_TOLERANCE`].
#[must_use]
pub fn same_coordinate(a: f64, b: f64) -> bool {
    (a - b).abs() < LINEAR_TOLERANCE
}
