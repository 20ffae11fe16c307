use crate::error::{GeometryError, Result};
use crate::math::{Isometry3, Point3, UnitQuaternion, Vector3, TOLERANCE};
use crate::topology::Solid;

use super::RigidMotion;

/// Rotates a solid around an axis line.
pub struct Rotate {
    axis_origin: Point3,
    axis_direction: Vector3,
    angle: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `axis_origin` - Any point on the rotation axis.
    /// * `axis_direction` - Direction of the axis; need not be normalised.
    /// * `angle` - Rotation angle in radians, right-hand rule about the axis.
    #[must_use]
    pub fn new(axis_origin: Point3, axis_direction: Vector3, angle: f64) -> Self {
        Self {
            axis_origin,
            axis_direction,
            angle,
        }
    }

    /// Validates the axis and returns the equivalent rigid motion.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] if the axis direction is
    /// zero-length or any input is not finite.
    pub fn motion(&self) -> Result<RigidMotion> {
        if !self.angle.is_finite() {
            return Err(GeometryError::InvalidDimension {
                name: "angle",
                value: self.angle,
                constraint: "rotation angle must be finite",
            }
            .into());
        }
        if !self.axis_origin.iter().all(|v| v.is_finite()) {
            return Err(GeometryError::InvalidDimension {
                name: "axis_origin",
                value: f64::NAN,
                constraint: "axis point coordinates must be finite",
            }
            .into());
        }
        let len = self.axis_direction.norm();
        if !(len.is_finite() && len > TOLERANCE) {
            return Err(GeometryError::InvalidDimension {
                name: "axis_direction",
                value: len,
                constraint: "rotation axis must be a finite non-zero vector",
            }
            .into());
        }

        let rotation = UnitQuaternion::from_scaled_axis(self.axis_direction / len * self.angle);
        Ok(RigidMotion::new(Isometry3::rotation_wrt_point(
            rotation,
            self.axis_origin,
        )))
    }

    /// Executes the rotation, consuming `solid` and returning the rotated
    /// solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis is degenerate.
    pub fn execute(&self, solid: Solid) -> Result<Solid> {
        Ok(self.motion()?.apply(solid))
    }
}
