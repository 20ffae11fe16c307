use crate::math::Point3;

slotmap::new_key_type! {
    /// Identifier of a boundary vertex in the topology store.
    pub struct VertexId;
}

/// A boundary vertex, in world coordinates.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// Position of the vertex.
    pub point: Point3,
}
