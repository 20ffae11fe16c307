pub mod cells;
pub mod edge;
pub mod face;
pub mod shell;
pub mod solid;
pub mod vertex;

pub use cells::{CellGrid, GridIndex};
pub use edge::{EdgeData, EdgeId, OrientedEdge};
pub use face::{FaceData, FaceId};
pub use shell::{ShellData, ShellId};
pub use solid::Solid;
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Arena holding the explicit boundary of one or more solids.
///
/// Solids themselves are plain values; their boundary is only materialised
/// here when a consumer (tessellation, volume, STEP export) needs faces,
/// edges and vertices. Entities reference each other through typed
/// generational keys.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
}

impl TopologyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    pub fn add_shell(&mut self, data: ShellData) -> ShellId {
        self.shells.insert(data)
    }

    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for a stale or foreign key.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        lookup(&self.vertices, id, "vertex")
    }

    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for a stale or foreign key.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        lookup(&self.edges, id, "edge")
    }

    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for a stale or foreign key.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        lookup(&self.faces, id, "face")
    }

    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for a stale or foreign key.
    pub fn shell(&self, id: ShellId) -> Result<&ShellData, TopologyError> {
        lookup(&self.shells, id, "shell")
    }

    /// Every vertex with its key, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Corner positions of a face, following its loop.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] if the face or anything it
    /// references is missing.
    pub fn face_points(&self, id: FaceId) -> Result<Vec<Point3>, TopologyError> {
        self.face(id)?
            .edges
            .iter()
            .map(|oriented| {
                let edge = self.edge(oriented.edge)?;
                let first = if oriented.forward { edge.start } else { edge.end };
                Ok(self.vertex(first)?.point)
            })
            .collect()
    }
}

fn lookup<'a, K: slotmap::Key, V>(
    map: &'a SlotMap<K, V>,
    id: K,
    kind: &str,
) -> Result<&'a V, TopologyError> {
    map.get(id)
        .ok_or_else(|| TopologyError::EntityNotFound(format!("{kind} {id:?}")))
}
