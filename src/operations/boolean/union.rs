use crate::error::{GeometryError, Result};
use crate::math::{Aabb, Isometry3, ANGULAR_TOLERANCE};
use crate::topology::{CellGrid, Solid};

/// Computes the boolean union of two solids.
///
/// The result is expressed in the local frame of `solid_a`. Both operands
/// must be orthogonal in that frame, i.e. `solid_b`'s placement relative to
/// `solid_a` may only permute and flip axes.
pub struct Union {
    solid_a: Solid,
    solid_b: Solid,
}

impl Union {
    /// Creates a new `Union` operation. Both operands are consumed.
    #[must_use]
    pub fn new(solid_a: Solid, solid_b: Solid) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the union.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::BooleanFailure`] if the operands are not
    /// orthogonally aligned, if the result is empty, or if the result falls
    /// apart into more than one face-connected lump.
    pub fn execute(self) -> Result<Solid> {
        let placement = *self.solid_a.placement();
        let relative = placement.inverse() * self.solid_b.placement();

        if !is_axis_aligned(&relative) {
            return Err(GeometryError::BooleanFailure(
                "operands are rotated against each other by a non-right angle".into(),
            )
            .into());
        }

        let mut boxes: Vec<Aabb> = self.solid_a.cells().boxes().collect();
        boxes.extend(self.solid_b.cells().boxes().map(|b| {
            Aabb::from_corners(relative * b.min, relative * b.max)
        }));

        let cells = CellGrid::from_boxes(&boxes);
        match cells.lump_count() {
            0 => Err(GeometryError::BooleanFailure("union produced an empty solid".into()).into()),
            1 => Ok(Solid::from_parts(placement, cells)),
            n => Err(GeometryError::BooleanFailure(format!(
                "union produced {n} disconnected lumps; operands neither overlap nor share a face"
            ))
            .into()),
        }
    }
}

/// Returns `true` if the rotation part maps each axis onto a (signed) axis.
fn is_axis_aligned(isometry: &Isometry3) -> bool {
    let matrix = isometry.rotation.to_rotation_matrix();
    matrix.matrix().iter().all(|&v| {
        let a = v.abs();
        a < ANGULAR_TOLERANCE || (a - 1.0).abs() < ANGULAR_TOLERANCE
    })
}
