use crate::error::{GeometryError, Result};
use crate::math::{Isometry3, Vector3};
use crate::topology::Solid;

use super::RigidMotion;

/// Translates a solid by a displacement vector in world coordinates.
pub struct Translate {
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(displacement: Vector3) -> Self {
        Self { displacement }
    }

    /// Validates the displacement and returns the equivalent rigid motion.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] if a component of the
    /// displacement is not finite.
    pub fn motion(&self) -> Result<RigidMotion> {
        for (name, value) in [
            ("dx", self.displacement.x),
            ("dy", self.displacement.y),
            ("dz", self.displacement.z),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::InvalidDimension {
                    name,
                    value,
                    constraint: "translation components must be finite",
                }
                .into());
            }
        }
        Ok(RigidMotion::new(Isometry3::translation(
            self.displacement.x,
            self.displacement.y,
            self.displacement.z,
        )))
    }

    /// Executes the translation, consuming `solid` and returning the moved
    /// solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the displacement is not finite.
    pub fn execute(&self, solid: Solid) -> Result<Solid> {
        Ok(self.motion()?.apply(solid))
    }
}
