use crate::error::{GeometryError, Result};
use crate::math::Aabb;
use crate::topology::Solid;

/// Computes the world-space axis-aligned bounding box of a solid.
pub struct BoundingBox<'a> {
    solid: &'a Solid,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(solid: &'a Solid) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the AABB.
    ///
    /// The corners of every material cell are mapped to world space, so the
    /// box stays tight for rotated solids too.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::BooleanFailure`] if the solid has no material.
    pub fn execute(&self) -> Result<Aabb> {
        let corners = self
            .solid
            .cells()
            .boxes()
            .flat_map(|cell| cell.corners())
            .map(|local| self.solid.to_world(&local));
        Aabb::from_points(corners)
            .ok_or_else(|| GeometryError::BooleanFailure("solid has no material".into()).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;
    use crate::operations::transform::Rotate;

    #[test]
    fn rotated_box_grows_its_aabb() {
        let solid = MakeBox::new(2.0, 2.0, 1.0).execute().unwrap();
        let solid = Rotate::new(
            Point3::new(1.0, 1.0, 0.0),
            Vector3::z(),
            std::f64::consts::FRAC_PI_4,
        )
        .execute(solid)
        .unwrap();
        let aabb = BoundingBox::new(&solid).execute().unwrap();
        let half_diagonal = 2.0_f64.sqrt();
        assert_relative_eq!(aabb.min.x, 1.0 - half_diagonal, epsilon = 1e-12);
        assert_relative_eq!(aabb.max.y, 1.0 + half_diagonal, epsilon = 1e-12);
        assert_relative_eq!(aabb.extent().z, 1.0, epsilon = 1e-12);
    }
}
