use crate::error::{Result, TopologyError};
use crate::operations::query::ExtractBoundary;
use crate::topology::{Solid, TopologyStore};

use super::TriangleMesh;

/// Tessellates the boundary of a solid into one triangle mesh.
///
/// Faces are planar and convex, so each one is fanned from its first
/// corner. Every face gets its own vertices so the flat normals stay sharp.
pub struct TessellateSolid<'a> {
    solid: &'a Solid,
}

impl<'a> TessellateSolid<'a> {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(solid: &'a Solid) -> Self {
        Self { solid }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the extracted boundary is inconsistent or too
    /// large to index with 32-bit indices.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let mut store = TopologyStore::new();
        let shell_id = ExtractBoundary::new(self.solid).execute(&mut store);
        let shell = store.shell(shell_id)?;

        let mut mesh = TriangleMesh::default();
        for &face_id in &shell.faces {
            let normal = store.face(face_id)?.normal;
            let points = store.face_points(face_id)?;
            let base = u32::try_from(mesh.vertices.len())
                .map_err(|_| TopologyError::IndexOverflow { max: u32::MAX })?;
            for (offset, point) in (0u32..).zip(&points) {
                mesh.vertices.push(*point);
                mesh.normals.push(normal);
                if offset >= 2 {
                    mesh.indices.push([base, base + offset - 1, base + offset]);
                }
            }
        }
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::operations::creation::{MakeBox, MakeISection};

    #[test]
    fn box_tessellates_to_twelve_triangles() {
        let solid = MakeBox::new(2.0, 3.0, 4.0).execute().unwrap();
        let mesh = TessellateSolid::new(&solid).execute().unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
        assert_relative_eq!(mesh.area(), 2.0 * (6.0 + 8.0 + 12.0), max_relative = 1e-12);
    }

    #[test]
    fn merged_meshes_keep_indices_valid() {
        let a = MakeBox::new(1.0, 1.0, 1.0).execute().unwrap();
        let b = MakeISection::new(900.0, 300.0, 16.0, 10.0, 100.0)
            .execute()
            .unwrap();
        let mut mesh = TessellateSolid::new(&a).execute().unwrap();
        mesh.merge(&TessellateSolid::new(&b).execute().unwrap());
        let count = u32::try_from(mesh.vertices.len()).unwrap();
        assert!(mesh.indices.iter().flatten().all(|&i| i < count));
        assert_eq!(mesh.triangles().count(), mesh.triangle_count());
    }
}
