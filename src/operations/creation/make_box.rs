use crate::error::{GeometryError, Result};
use crate::math::{Aabb, Isometry3, Point3, LINEAR_TOLERANCE};
use crate::topology::{CellGrid, Solid};

/// Creates an axis-aligned rectangular prism.
///
/// One corner sits at the local origin; the prism extends `length_x` along
/// +X, `width_y` along +Y and `height_z` along +Z.
pub struct MakeBox {
    length_x: f64,
    width_y: f64,
    height_z: f64,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(length_x: f64, width_y: f64, height_z: f64) -> Self {
        Self {
            length_x,
            width_y,
            height_z,
        }
    }

    /// Executes the operation, returning the prism.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] if any extent is not
    /// finite or is shorter than [`LINEAR_TOLERANCE`].
    pub fn execute(&self) -> Result<Solid> {
        positive_extent("length_x", self.length_x)?;
        positive_extent("width_y", self.width_y)?;
        positive_extent("height_z", self.height_z)?;

        let aabb = Aabb::from_corners(
            Point3::origin(),
            Point3::new(self.length_x, self.width_y, self.height_z),
        );
        Ok(Solid::from_parts(
            Isometry3::identity(),
            CellGrid::from_boxes(&[aabb]),
        ))
    }
}

/// Rejects non-finite extents and any extent the cell grid would collapse.
fn positive_extent(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= LINEAR_TOLERANCE {
        Ok(())
    } else {
        Err(GeometryError::InvalidDimension {
            name,
            value,
            constraint: "must be a finite value of at least the linear tolerance",
        }
        .into())
    }
}
