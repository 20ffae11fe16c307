use crate::math::Isometry3;
use crate::topology::Solid;

/// A validated rigid motion, ready to be applied to solids.
///
/// Applying a motion consumes the solid and returns the moved one. Motions
/// are applied one after another in world coordinates; a sequence is never
/// folded into a single operator beforehand, so call order is significant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidMotion {
    isometry: Isometry3,
}

impl RigidMotion {
    /// Wraps an isometry.
    #[must_use]
    pub fn new(isometry: Isometry3) -> Self {
        Self { isometry }
    }

    /// The motion that leaves every point in place.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Isometry3::identity())
    }

    /// The underlying isometry.
    #[must_use]
    pub fn isometry(&self) -> &Isometry3 {
        &self.isometry
    }

    /// Moves `solid`, returning the new solid.
    #[must_use]
    pub fn apply(&self, solid: Solid) -> Solid {
        solid.moved(&self.isometry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;

    #[test]
    fn identity_keeps_placement() {
        let solid = MakeBox::new(1.0, 1.0, 1.0).execute().unwrap();
        let before = solid.clone();
        let after = RigidMotion::identity().apply(solid);
        assert_eq!(after, before);
    }

    #[test]
    fn motions_compose_in_call_order() {
        let solid = MakeBox::new(1.0, 1.0, 1.0).execute().unwrap();
        let shift = RigidMotion::new(Isometry3::translation(10.0, 0.0, 0.0));
        let quarter = RigidMotion::new(Isometry3::rotation(
            Vector3::z() * std::f64::consts::FRAC_PI_2,
        ));

        let shift_then_turn = quarter.apply(shift.apply(solid.clone()));
        let turn_then_shift = shift.apply(quarter.apply(solid));

        let a = shift_then_turn.origin();
        let b = turn_then_shift.origin();
        assert!((a - Point3::new(0.0, 10.0, 0.0)).norm() < 1e-9);
        assert!((b - Point3::new(10.0, 0.0, 0.0)).norm() < 1e-9);
    }
}
