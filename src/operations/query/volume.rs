use crate::error::Result;
use crate::tessellation::TessellateSolid;
use crate::topology::Solid;

/// Computes the volume of a solid.
///
/// Uses the tessellated boundary and the signed tetrahedron method: for each
/// triangle, `(1/6) * v0 . (v1 x v2)`, summed over all triangles. The
/// boundary is consistently wound outward, so the sum is the enclosed volume
/// wherever the solid sits in space.
pub struct Volume<'a> {
    solid: &'a Solid,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(solid: &'a Solid) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the volume (absolute value).
    ///
    /// # Errors
    ///
    /// Returns an error if the solid cannot be tessellated.
    pub fn execute(&self) -> Result<f64> {
        let mesh = TessellateSolid::new(self.solid).execute()?;

        // Tetrahedra are taken against the solid's own origin rather than the
        // world origin, which keeps the terms small for members far from it.
        let apex = self.solid.origin();
        let signed_volume: f64 = mesh
            .triangles()
            .map(|[v0, v1, v2]| {
                let (a, b, c) = (v0 - apex, v1 - apex, v2 - apex);
                a.dot(&b.cross(&c))
            })
            .sum();

        Ok(signed_volume.abs() / 6.0)
    }
}
