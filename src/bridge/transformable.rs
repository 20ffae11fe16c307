use crate::error::{ProtocolError, Result};
use crate::math::{Point3, Vector3};
use crate::operations::transform::{RigidMotion, Rotate, Translate};
use crate::topology::Solid;

/// Rigid-motion capabilities shared by every bridge component.
///
/// Implementors only expose the slot holding their solid; the provided
/// methods take the solid out, move it, and put the result back. Motions
/// accumulate in call order.
pub trait Transformable {
    /// Name used in protocol errors.
    fn name(&self) -> String;

    /// The held solid, `None` before geometry has been created.
    fn solid_slot(&self) -> Option<&Solid>;

    /// Mutable access to the held solid.
    fn solid_slot_mut(&mut self) -> &mut Option<Solid>;

    /// The held solid.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UninitializedComponent`] if no geometry has
    /// been created yet.
    fn current_solid(&self) -> Result<&Solid> {
        self.solid_slot().ok_or_else(|| {
            ProtocolError::UninitializedComponent {
                component: self.name(),
            }
            .into()
        })
    }

    /// Translates the held solid by `(dx, dy, dz)` in world coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UninitializedComponent`] before geometry
    /// exists, or [`crate::error::GeometryError::InvalidDimension`] for a
    /// non-finite displacement.
    fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> Result<()> {
        self.current_solid()?;
        let motion = Translate::new(Vector3::new(dx, dy, dz)).motion()?;
        self.apply_motion(&motion)
    }

    /// Rotates the held solid about the line through `axis_point` along
    /// `axis_direction`, right-hand rule, by `angle_degrees`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UninitializedComponent`] before geometry
    /// exists, or [`crate::error::GeometryError::InvalidDimension`] for a
    /// zero-length axis or non-finite input.
    fn rotate(
        &mut self,
        axis_point: Point3,
        axis_direction: Vector3,
        angle_degrees: f64,
    ) -> Result<()> {
        self.current_solid()?;
        let motion = Rotate::new(axis_point, axis_direction, angle_degrees.to_radians()).motion()?;
        self.apply_motion(&motion)
    }

    /// Applies an already validated motion to the held solid.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UninitializedComponent`] if no geometry has
    /// been created yet.
    fn apply_motion(&mut self, motion: &RigidMotion) -> Result<()> {
        let Some(solid) = self.solid_slot_mut().take() else {
            return Err(ProtocolError::UninitializedComponent {
                component: self.name(),
            }
            .into());
        };
        *self.solid_slot_mut() = Some(motion.apply(solid));
        Ok(())
    }
}
