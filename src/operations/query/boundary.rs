use std::collections::HashMap;

use crate::math::Vector3;
use crate::topology::{
    EdgeData, EdgeId, FaceData, GridIndex, OrientedEdge, ShellData, ShellId, Solid,
    TopologyStore, VertexData, VertexId,
};

/// Materialises the boundary of a solid as faces, edges and vertices in a
/// [`TopologyStore`], in world coordinates.
///
/// Every exposed side of a material cell becomes one planar quad face.
/// Vertices are welded by grid node and edges by vertex pair, so adjacent
/// faces share their edges.
pub struct ExtractBoundary<'a> {
    solid: &'a Solid,
}

impl<'a> ExtractBoundary<'a> {
    /// Creates a new `ExtractBoundary` operation.
    #[must_use]
    pub fn new(solid: &'a Solid) -> Self {
        Self { solid }
    }

    /// Executes the extraction, returning the shell that bounds the solid.
    pub fn execute(&self, store: &mut TopologyStore) -> ShellId {
        let cells = self.solid.cells();
        let mut vertices: HashMap<GridIndex, VertexId> = HashMap::new();
        let mut edges: HashMap<(VertexId, VertexId), (EdgeId, usize)> = HashMap::new();
        let mut faces = Vec::new();

        for cell in cells.occupied_cells() {
            for axis in 0..3 {
                for positive in [false, true] {
                    let mut neighbour = cell;
                    let exposed = if positive {
                        neighbour[axis] += 1;
                        !cells.is_occupied(neighbour)
                    } else {
                        match cell[axis].checked_sub(1) {
                            Some(v) => {
                                neighbour[axis] = v;
                                !cells.is_occupied(neighbour)
                            }
                            None => true,
                        }
                    };
                    if !exposed {
                        continue;
                    }

                    let corners = quad_nodes(cell, axis, positive);
                    let ids: Vec<VertexId> = corners
                        .iter()
                        .map(|&node| {
                            *vertices.entry(node).or_insert_with(|| {
                                store.add_vertex(VertexData {
                                    point: self.solid.to_world(&cells.node(node)),
                                })
                            })
                        })
                        .collect();

                    let mut loop_edges = Vec::with_capacity(4);
                    for i in 0..4 {
                        let (a, b) = (ids[i], ids[(i + 1) % 4]);
                        let key = if a < b { (a, b) } else { (b, a) };
                        let entry = edges.entry(key).or_insert_with(|| {
                            let id = store.add_edge(EdgeData {
                                start: key.0,
                                end: key.1,
                            });
                            (id, 0)
                        });
                        entry.1 += 1;
                        loop_edges.push(OrientedEdge {
                            edge: entry.0,
                            forward: a == key.0,
                        });
                    }

                    let mut local_normal = Vector3::zeros();
                    local_normal[axis] = if positive { 1.0 } else { -1.0 };
                    let normal = self.solid.placement().rotation * local_normal;

                    faces.push(store.add_face(FaceData {
                        edges: loop_edges,
                        normal,
                    }));
                }
            }
        }

        let is_closed = !faces.is_empty() && edges.values().all(|&(_, uses)| uses == 2);
        store.add_shell(ShellData { faces, is_closed })
    }
}

/// Grid nodes of one cell side, counter-clockwise seen from outside.
///
/// With `u = axis + 1` and `v = axis + 2` (cyclic), `e_u x e_v = e_axis`, so
/// walking `u` first and then `v` winds around `+axis`.
fn quad_nodes(cell: GridIndex, axis: usize, positive: bool) -> [GridIndex; 4] {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;
    let node = |du: usize, dv: usize| {
        let mut n = cell;
        n[axis] += usize::from(positive);
        n[u] += du;
        n[v] += dv;
        n
    };
    let ring = [node(0, 0), node(1, 0), node(1, 1), node(0, 1)];
    if positive {
        ring
    } else {
        [ring[0], ring[3], ring[2], ring[1]]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::{MakeBox, MakeISection};
    use crate::operations::transform::Rotate;

    #[test]
    fn box_has_six_faces_eight_vertices() {
        let solid = MakeBox::new(2.0, 3.0, 4.0).execute().unwrap();
        let mut store = TopologyStore::new();
        let shell = ExtractBoundary::new(&solid).execute(&mut store);
        let shell = store.shell(shell).unwrap();
        assert_eq!(shell.faces.len(), 6);
        assert!(shell.is_closed);
        assert_eq!(store.vertices().count(), 8);
    }

    #[test]
    fn face_winding_agrees_with_normal() {
        let solid = MakeISection::new(900.0, 300.0, 16.0, 10.0, 1000.0)
            .execute()
            .unwrap();
        let mut store = TopologyStore::new();
        let shell = ExtractBoundary::new(&solid).execute(&mut store);
        for &face_id in &store.shell(shell).unwrap().faces {
            let pts = store.face_points(face_id).unwrap();
            let winding = (pts[1] - pts[0]).cross(&(pts[2] - pts[1]));
            let normal = store.face(face_id).unwrap().normal;
            assert!(winding.dot(&normal) > 0.0);
        }
    }

    #[test]
    fn i_section_boundary_is_closed() {
        let solid = MakeISection::new(900.0, 300.0, 16.0, 10.0, 1000.0)
            .execute()
            .unwrap();
        let mut store = TopologyStore::new();
        let shell = ExtractBoundary::new(&solid).execute(&mut store);
        assert!(store.shell(shell).unwrap().is_closed);
    }

    #[test]
    fn normals_follow_rotation() {
        let solid = MakeBox::new(1.0, 1.0, 1.0).execute().unwrap();
        let solid = Rotate::new(Point3::origin(), Vector3::z(), 0.5)
            .execute(solid)
            .unwrap();
        let mut store = TopologyStore::new();
        let shell = ExtractBoundary::new(&solid).execute(&mut store);
        for &face_id in &store.shell(shell).unwrap().faces {
            let normal = store.face(face_id).unwrap().normal;
            assert!((normal.norm() - 1.0).abs() < 1e-12);
        }
    }
}
